use anchor_lang::prelude::*;

// 8 discriminator, 32 pubkey, 1 bump
pub const VAULT_ACCOUNT_SIZE: usize = 8 + 32 + 1;

/// Custodies the pooled entry fees. Lamports above the rent-exempt floor
/// are the prize pool; the floor itself never moves.
#[account]
pub struct Vault {
    pub raffle: Pubkey,
    pub bump: u8,
}

impl Vault {
    /// The spendable pool: everything above the rent-exempt minimum.
    /// Direct lamport mutation only works because the vault is a PDA
    /// owned by this program.
    pub fn pool_balance(account: &AccountInfo) -> Result<u64> {
        let rent_floor = Rent::get()?.minimum_balance(VAULT_ACCOUNT_SIZE);
        Ok(account.lamports().saturating_sub(rent_floor))
    }
}
