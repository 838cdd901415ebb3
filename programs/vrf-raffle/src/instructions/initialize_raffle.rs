use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{
        raffle::{Raffle, RaffleState},
        vrf::VrfConfig,
        Vault, RAFFLE_ACCOUNT_SIZE, VAULT_ACCOUNT_SIZE,
    },
};

/// Event emitted when the raffle is initialized
#[event]
pub struct RaffleInitialized {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The vault PDA holding the pool
    pub vault: Pubkey,
    /// Minimum entry payment in lamports
    pub entry_fee: u64,
    /// Minimum seconds between draws
    pub interval: i64,
    /// The VRF provider authority allowed to fulfill requests
    pub vrf_authority: Pubkey,
    /// When the raffle was created
    pub creation_time: i64,
}

/// Instruction to create the singleton raffle and its vault
///
/// This is the deployment step: every parameter recorded here is immutable
/// for the raffle's lifetime. There are no update instructions.
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `entry_fee` - Minimum lamports a single entry must pay (must be > 0)
/// * `interval` - Minimum seconds between a reset and the next draw (must be > 0)
/// * `key_hash` - Provider key/tier identifier selecting the fee lane
/// * `subscription_id` - Subscription funding randomness requests
/// * `request_confirmations` - Confirmations the provider waits for
/// * `callback_gas_limit` - Gas budget for the fulfillment callback (must be > 0)
///
/// # Account Validations
/// * Raffle - New singleton PDA with seed ["raffle"]
/// * Vault - New PDA with seeds ["vault", raffle_key], rent-funded by payer
/// * VrfAuthority - Recorded as the only identity allowed to fulfill
pub fn initialize_raffle(
    ctx: Context<InitializeRaffle>,
    entry_fee: u64,
    interval: i64,
    key_hash: [u8; 32],
    subscription_id: u64,
    request_confirmations: u16,
    callback_gas_limit: u32,
) -> Result<()> {
    require!(entry_fee > 0, RaffleError::InvalidEntryFee);
    require!(interval > 0, RaffleError::InvalidInterval);
    require!(callback_gas_limit > 0, RaffleError::InvalidCallbackGasLimit);

    let current_time = Clock::get()?.unix_timestamp;

    let raffle = &mut ctx.accounts.raffle;
    raffle.vault = ctx.accounts.vault.key();
    raffle.entry_fee = entry_fee;
    raffle.interval = interval;
    raffle.last_draw_time = current_time;
    raffle.raffle_state = RaffleState::Open;
    raffle.players = Vec::new();
    raffle.recent_winner = None;
    raffle.pending_request_id = None;
    raffle.request_counter = 0;
    raffle.vrf = VrfConfig {
        authority: ctx.accounts.vrf_authority.key(),
        key_hash,
        subscription_id,
        request_confirmations,
        callback_gas_limit,
    };
    raffle.bump = ctx.bumps.raffle;

    ctx.accounts.vault.raffle = ctx.accounts.raffle.key();
    ctx.accounts.vault.bump = ctx.bumps.vault;

    emit!(RaffleInitialized {
        raffle: ctx.accounts.raffle.key(),
        vault: ctx.accounts.vault.key(),
        entry_fee,
        interval,
        vrf_authority: ctx.accounts.vrf_authority.key(),
        creation_time: current_time,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    #[account(
        init,
        payer = payer,
        space = RAFFLE_ACCOUNT_SIZE,
        seeds = [b"raffle"],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        init,
        payer = payer,
        space = VAULT_ACCOUNT_SIZE,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub payer: Signer<'info>,

    /// The off-chain VRF provider identity; only its signature is accepted
    /// on `fulfill_random_words`
    pub vrf_authority: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}
