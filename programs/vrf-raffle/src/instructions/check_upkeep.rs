use anchor_lang::prelude::*;

use crate::state::{Raffle, Vault};

/// Result of an eligibility query, returned through Anchor return data.
/// `perform_data` is always empty; the slot exists for interface symmetry
/// with automation callers that expect an opaque payload next to the flag.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct UpkeepStatus {
    pub upkeep_needed: bool,
    pub perform_data: Vec<u8>,
}

/// Read-only eligibility query: reports whether a draw can be triggered
/// right now. Mutates nothing and is callable in any state; while a draw
/// is in flight it simply reports false.
///
/// A draw is eligible when all four conditions hold:
/// 1. The raffle is open
/// 2. The draw interval has elapsed since the last reset
/// 3. The pool holds a nonzero balance
/// 4. At least one player is entered
pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepStatus> {
    let now = Clock::get()?.unix_timestamp;
    let pool_balance = Vault::pool_balance(&ctx.accounts.vault.to_account_info())?;

    Ok(UpkeepStatus {
        upkeep_needed: ctx.accounts.raffle.upkeep_needed(now, pool_balance),
        perform_data: Vec::new(),
    })
}

/// Accounts required for the check_upkeep instruction
#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [b"raffle"],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// Vault holding the pool; read only to measure the balance
    #[account(
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,
}
