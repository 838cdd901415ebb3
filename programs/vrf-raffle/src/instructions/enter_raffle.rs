use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{
        raffle::{Raffle, RaffleState},
        Vault,
    },
};

/// Event emitted when a player enters the raffle
#[event]
pub struct RaffleEntered {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The entering player
    pub player: Pubkey,
    /// Lamports paid into the pool
    pub amount: u64,
}

/// Instruction to enter the raffle by paying at least the entry fee
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `amount` - Lamports transferred into the vault (must be >= entry fee)
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Validates raffle is in Open state through account constraints
/// 2. Validates the payment covers the entry fee
/// 3. Enforces the player-list capacity bound
/// 4. Verifies the vault received exactly the paid amount
///
/// # Implementation Notes
/// - Overpayment is retained by the pool; no refund is made
/// - Re-entry by the same player is allowed and counts as another ticket
/// - Player list is appended before the transfer; the transaction is
///   atomic, so a failed transfer discards the append
pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    ctx.accounts
        .raffle
        .record_entry(ctx.accounts.player.key(), amount)?;

    // Store pre-transfer balance for verification
    let pre_transfer_balance = ctx.accounts.vault.to_account_info().lamports();

    // Transfer lamports from the player to the vault
    anchor_lang::solana_program::program::invoke(
        &anchor_lang::solana_program::system_instruction::transfer(
            &ctx.accounts.player.key(),
            &ctx.accounts.vault.key(),
            amount,
        ),
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            ctx.accounts.vault.to_account_info(),
        ],
    )?;

    // Verify the transfer was successful by checking the vault balance
    let post_transfer_balance = ctx.accounts.vault.to_account_info().lamports();
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(amount)
                .ok_or(RaffleError::Overflow)?,
        RaffleError::TransferFailed
    );

    emit!(RaffleEntered {
        raffle: ctx.accounts.raffle.key(),
        player: ctx.accounts.player.key(),
        amount,
    });

    Ok(())
}

/// Accounts required for the enter_raffle instruction
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    /// The raffle being entered. Must be in Open state
    #[account(
        mut,
        seeds = [b"raffle"],
        bump = raffle.bump,
        constraint = raffle.raffle_state == RaffleState::Open @ RaffleError::RaffleNotOpen,
    )]
    pub raffle: Account<'info, Raffle>,

    /// Vault that receives the entry payment
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

    /// The entering player, paying the entry fee
    #[account(mut)]
    pub player: Signer<'info>,

    /// Required for the lamport transfer
    pub system_program: Program<'info, System>,
}
