use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{vrf::VrfRequest, Raffle, Vault},
};

/// Event emitted when a randomness request is issued. The off-chain VRF
/// provider watches for this event and answers by invoking
/// `fulfill_random_words` with the same request id.
#[event]
pub struct RandomWordsRequested {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Identifier the fulfillment must echo back
    pub request_id: u64,
    /// Provider key/tier identifier
    pub key_hash: [u8; 32],
    /// Subscription funding the request
    pub subscription_id: u64,
    /// Confirmations the provider waits for before responding
    pub request_confirmations: u16,
    /// Gas budget for the fulfillment callback
    pub callback_gas_limit: u32,
    /// Number of random words requested
    pub num_words: u32,
    /// Whether the request is paid in the native token
    pub native_payment: bool,
    /// When the request was issued
    pub timestamp: i64,
}

/// Instruction to trigger a draw once the raffle is eligible
///
/// Anyone may call this; it is the crank automation infrastructure turns.
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Re-evaluates the full eligibility conjunction internally, never
///    trusting a prior `check_upkeep` answer
/// 2. Independently re-checks the interval as defense in depth; a
///    discrepancy with the eligibility result fails loudly
/// 3. Flips the raffle to Calculating before the request leaves the
///    program, so no entry and no second draw can occur in flight
///
/// # Implementation Notes
/// - On ineligibility the current pool balance, player count and state
///   code are logged for external automation to diagnose
/// - The request itself is surfaced through `RandomWordsRequested`; if
///   emission fails the whole instruction (state flip included) rolls back
pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool_balance = Vault::pool_balance(&ctx.accounts.vault.to_account_info())?;

    let raffle = &mut ctx.accounts.raffle;

    if !raffle.upkeep_needed(now, pool_balance) {
        msg!(
            "Upkeep not needed: balance={}, players={}, state={}",
            pool_balance,
            raffle.players.len(),
            raffle.state_code()
        );
        return err!(RaffleError::UpkeepNotNeeded);
    }

    // Defense in depth: the interval term was part of the conjunction
    // above; failing here means the eligibility logic is inconsistent
    require!(
        raffle.interval_elapsed(now),
        RaffleError::IntervalNotElapsed
    );

    let request_id = raffle.begin_draw()?;
    let request = VrfRequest::new(&raffle.vrf, request_id);

    emit!(RandomWordsRequested {
        raffle: raffle.key(),
        request_id: request.request_id,
        key_hash: request.key_hash,
        subscription_id: request.subscription_id,
        request_confirmations: request.request_confirmations,
        callback_gas_limit: request.callback_gas_limit,
        num_words: request.num_words,
        native_payment: request.native_payment,
        timestamp: now,
    });

    Ok(())
}

/// Accounts required for the perform_upkeep instruction
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(
        mut,
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
