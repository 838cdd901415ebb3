use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{
        raffle::{Raffle, RaffleState},
        vrf, Vault,
    },
};

/// Event emitted when a winner is picked and paid
#[event]
pub struct WinnerPicked {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The winning player
    pub winner: Pubkey,
    /// The request this fulfillment answered
    pub request_id: u64,
    /// Lamports paid out
    pub prize: u64,
}

/// Instruction the VRF provider invokes to deliver randomness for an
/// in-flight draw. This is the only path out of the Calculating state.
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `request_id` - Must match the pending request recorded at trigger time
/// * `random_words` - The provider's response; only the first word is used
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Only the VRF authority configured at initialization may invoke it
/// 2. The raffle must be in Calculating state (unsolicited or stale
///    fulfillments are rejected)
/// 3. The request id must match the pending request exactly
/// 4. The winner account passed in must equal `players[word % len]`
///
/// # Implementation Notes
/// - Bookkeeping (winner recorded, state reopened, players cleared,
///   timestamp refreshed, event emitted) is committed before the payout
///   lamports move; if the payout fails the runtime discards the whole
///   transaction, leaving the raffle Calculating with players and pool
///   intact for the provider to retry
/// - The payout drains the vault down to its rent-exempt floor
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    require!(
        ctx.accounts.raffle.pending_request_id == Some(request_id),
        RaffleError::RequestIdMismatch
    );
    require!(!random_words.is_empty(), RaffleError::NoRandomWords);

    let draw_value = vrf::draw_value(&random_words[0]);
    let winner = ctx.accounts.raffle.pick_winner(draw_value)?;
    require!(
        ctx.accounts.winner.key() == winner,
        RaffleError::WinnerAccountMismatch
    );

    let vault_info = ctx.accounts.vault.to_account_info();
    let prize = Vault::pool_balance(&vault_info)?;
    require!(prize > 0, RaffleError::PrizePoolEmpty);

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.raffle.settle(winner, now);

    emit!(WinnerPicked {
        raffle: ctx.accounts.raffle.key(),
        winner,
        request_id,
        prize,
    });

    // Payout comes last, after every internal effect is committed.
    // Direct lamport arithmetic works because the vault is a PDA owned
    // by this program.
    vault_info.sub_lamports(prize)?;
    ctx.accounts.winner.to_account_info().add_lamports(prize)?;

    Ok(())
}

/// Accounts required for the fulfill_random_words instruction
#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    /// The VRF provider authority configured at initialization
    #[account(
        constraint = vrf_authority.key() == raffle.vrf.authority @ RaffleError::OnlyVrfAuthority,
    )]
    pub vrf_authority: Signer<'info>,

    /// The raffle with an in-flight draw. Must be in Calculating state
    #[account(
        mut,
        seeds = [b"raffle"],
        bump = raffle.bump,
        constraint = raffle.raffle_state == RaffleState::Calculating @ RaffleError::RaffleNotCalculating,
    )]
    pub raffle: Account<'info, Raffle>,

    /// Vault holding the pool to pay out
    /// PDA with seeds ["vault", raffle_key]
    #[account(
        mut,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// The winner's wallet; verified against the drawn player before any
    /// lamports move
    #[account(mut)]
    pub winner: SystemAccount<'info>,
}
