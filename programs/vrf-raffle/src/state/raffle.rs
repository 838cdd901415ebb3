use anchor_lang::prelude::*;

use crate::error::RaffleError;
use crate::state::vrf::{VrfConfig, VRF_CONFIG_SIZE};

/// Hard cap on the player list; the account is allocated once at
/// initialization and cannot grow past it.
pub const MAX_PLAYERS: usize = 200;

// Space calculation:
// 8 (discriminator) +
// 32 (vault) +
// 8 (entry_fee) +
// 8 (interval) +
// 8 (last_draw_time) +
// 1 (raffle_state) +
// 4 + 32 * MAX_PLAYERS (players) +
// 33 (recent_winner: Option<Pubkey>) +
// 9 (pending_request_id: Option<u64>) +
// 8 (request_counter) +
// VRF_CONFIG_SIZE (vrf) +
// 1 (bump)
pub const RAFFLE_ACCOUNT_SIZE: usize =
    8 + 32 + 8 + 8 + 8 + 1 + (4 + 32 * MAX_PLAYERS) + 33 + 9 + 8 + VRF_CONFIG_SIZE + 1;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleState {
    /// Accepting entries
    Open = 0,
    /// Randomness request in flight; closed to entries and further draws
    Calculating = 1,
}

/// The singleton raffle account. One instance per deployment, cycling
/// Open -> Calculating -> Open indefinitely.
///
/// All transitions go through the methods below; instruction handlers stay
/// thin so the machine can be driven directly in tests with a chosen clock
/// and chosen random values.
#[account]
pub struct Raffle {
    /// The vault PDA holding the pool
    pub vault: Pubkey,
    /// Minimum lamports a single entry must pay; immutable
    pub entry_fee: u64,
    /// Minimum seconds between a reset and the next draw; immutable
    pub interval: i64,
    /// Set at initialization and on every settled draw
    pub last_draw_time: i64,
    pub raffle_state: RaffleState,
    /// Insertion-ordered; the same player may appear more than once,
    /// each entry counting as one ticket
    pub players: Vec<Pubkey>,
    /// Last winner, informational only
    pub recent_winner: Option<Pubkey>,
    /// Request id of the in-flight draw, if any. At most one request is
    /// ever outstanding.
    pub pending_request_id: Option<u64>,
    /// Monotonic source of request ids
    pub request_counter: u64,
    pub vrf: VrfConfig,
    pub bump: u8,
}

impl Raffle {
    pub fn is_open(&self) -> bool {
        self.raffle_state == RaffleState::Open
    }

    pub fn interval_elapsed(&self, now: i64) -> bool {
        now.saturating_sub(self.last_draw_time) >= self.interval
    }

    /// The draw-eligibility conjunction: open, interval elapsed, funded,
    /// and at least one player. Pure; callable in any state.
    pub fn upkeep_needed(&self, now: i64, pool_balance: u64) -> bool {
        self.is_open()
            && self.interval_elapsed(now)
            && pool_balance > 0
            && !self.players.is_empty()
    }

    /// Appends a player. Entry is accepted iff the raffle is open, the
    /// payment covers the entry fee, and the list has capacity left.
    /// Overpayment is kept by the pool.
    pub fn record_entry(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(self.is_open(), RaffleError::RaffleNotOpen);
        require!(
            amount >= self.entry_fee,
            RaffleError::SendMoreToEnterRaffle
        );
        require!(
            self.players.len() < MAX_PLAYERS,
            RaffleError::PlayerLimitReached
        );
        self.players.push(player);
        Ok(())
    }

    /// Flips the raffle into Calculating and hands out the request id for
    /// the draw. The flip happens before the request ever leaves the
    /// program, so no entry and no second draw can slip into the in-flight
    /// window.
    pub fn begin_draw(&mut self) -> Result<u64> {
        require!(self.is_open(), RaffleError::RaffleNotOpen);
        self.request_counter = self
            .request_counter
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        self.raffle_state = RaffleState::Calculating;
        self.pending_request_id = Some(self.request_counter);
        Ok(self.request_counter)
    }

    /// Maps the draw value onto the player list: `players[value % len]`.
    pub fn pick_winner(&self, draw_value: u64) -> Result<Pubkey> {
        require!(!self.players.is_empty(), RaffleError::NoPlayers);
        let winner_index = (draw_value % self.players.len() as u64) as usize;
        Ok(self.players[winner_index])
    }

    /// Commits the bookkeeping side of a fulfilled draw: record the winner,
    /// reopen, clear the player list and the pending request, refresh the
    /// draw timestamp. Must run before the payout transfer so a failed
    /// transfer aborts the instruction with no effect committed.
    pub fn settle(&mut self, winner: Pubkey, now: i64) {
        self.recent_winner = Some(winner);
        self.raffle_state = RaffleState::Open;
        self.players.clear();
        self.pending_request_id = None;
        self.last_draw_time = now;
    }

    /// Numeric state code for diagnostics
    pub fn state_code(&self) -> u8 {
        self.raffle_state as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEE: u64 = 100;
    const INTERVAL: i64 = 30;

    fn raffle() -> Raffle {
        Raffle {
            vault: Pubkey::new_unique(),
            entry_fee: FEE,
            interval: INTERVAL,
            last_draw_time: 0,
            raffle_state: RaffleState::Open,
            players: vec![],
            recent_winner: None,
            pending_request_id: None,
            request_counter: 0,
            vrf: VrfConfig {
                authority: Pubkey::new_unique(),
                key_hash: [7u8; 32],
                subscription_id: 1,
                request_confirmations: 3,
                callback_gas_limit: 200_000,
            },
            bump: 255,
        }
    }

    #[test]
    fn entries_append_in_order_and_allow_duplicates() {
        let mut r = raffle();
        let x = Pubkey::new_unique();
        let y = Pubkey::new_unique();
        r.record_entry(x, FEE).unwrap();
        r.record_entry(y, FEE).unwrap();
        r.record_entry(x, FEE).unwrap();
        assert_eq!(r.players, vec![x, y, x]);
    }

    #[test]
    fn entry_below_fee_rejected_and_leaves_players_unchanged() {
        let mut r = raffle();
        r.record_entry(Pubkey::new_unique(), FEE).unwrap();
        let before = r.players.clone();

        // 50 lamports against a fee of 100
        assert!(r.record_entry(Pubkey::new_unique(), FEE - 50).is_err());
        assert_eq!(r.players, before);

        // paying above the fee is accepted; the excess stays in the pool
        r.record_entry(Pubkey::new_unique(), FEE + 50).unwrap();
        assert_eq!(r.players.len(), 2);
    }

    #[test]
    fn entry_rejected_while_calculating() {
        let mut r = raffle();
        r.record_entry(Pubkey::new_unique(), FEE).unwrap();
        r.begin_draw().unwrap();
        let before = r.players.clone();
        assert!(r.record_entry(Pubkey::new_unique(), FEE).is_err());
        assert_eq!(r.players, before);
    }

    #[test]
    fn entry_rejected_at_capacity() {
        let mut r = raffle();
        for _ in 0..MAX_PLAYERS {
            r.record_entry(Pubkey::new_unique(), FEE).unwrap();
        }
        assert!(r.record_entry(Pubkey::new_unique(), FEE).is_err());
        assert_eq!(r.players.len(), MAX_PLAYERS);
    }

    #[test]
    fn upkeep_requires_the_full_conjunction() {
        let mut r = raffle();
        let funded = 300u64;

        // no players, no pool (Scenario C)
        assert!(!r.upkeep_needed(INTERVAL, 0));

        r.record_entry(Pubkey::new_unique(), FEE).unwrap();

        // funded with a player, but interval not elapsed (Scenario D)
        assert!(!r.upkeep_needed(INTERVAL - 1, funded));
        // interval elapsed but pool empty
        assert!(!r.upkeep_needed(INTERVAL, 0));
        // everything holds
        assert!(r.upkeep_needed(INTERVAL, funded));
        // boundary: elapsed means >=, not >
        assert!(r.upkeep_needed(INTERVAL + 1, funded));

        // not open
        r.begin_draw().unwrap();
        assert!(!r.upkeep_needed(INTERVAL, funded));
    }

    #[test]
    fn upkeep_false_without_players_even_when_funded() {
        let r = raffle();
        assert!(!r.upkeep_needed(INTERVAL, 300));
    }

    #[test]
    fn begin_draw_flips_state_and_issues_one_request() {
        let mut r = raffle();
        r.record_entry(Pubkey::new_unique(), FEE).unwrap();

        let id = r.begin_draw().unwrap();
        assert_eq!(id, 1);
        assert_eq!(r.raffle_state, RaffleState::Calculating);
        assert_eq!(r.pending_request_id, Some(1));

        // a second draw cannot start while one is in flight
        assert!(r.begin_draw().is_err());
        assert_eq!(r.pending_request_id, Some(1));
    }

    #[test]
    fn request_ids_are_monotonic_across_rounds() {
        let mut r = raffle();
        for expected in 1..=3u64 {
            r.record_entry(Pubkey::new_unique(), FEE).unwrap();
            let id = r.begin_draw().unwrap();
            assert_eq!(id, expected);
            let winner = r.pick_winner(0).unwrap();
            r.settle(winner, expected as i64 * INTERVAL);
        }
    }

    #[test]
    fn winner_is_value_modulo_player_count() {
        let mut r = raffle();
        let x = Pubkey::new_unique();
        let y = Pubkey::new_unique();
        let z = Pubkey::new_unique();
        r.record_entry(x, FEE).unwrap();
        r.record_entry(y, FEE).unwrap();
        r.record_entry(z, FEE).unwrap();

        // Scenario A: value 7 over three players lands on the second
        assert_eq!(r.pick_winner(7).unwrap(), y);
        assert_eq!(r.pick_winner(0).unwrap(), x);
        assert_eq!(r.pick_winner(2).unwrap(), z);
        assert_eq!(r.pick_winner(3).unwrap(), x);
        assert_eq!(r.pick_winner(u64::MAX).unwrap(), r.players[(u64::MAX % 3) as usize]);
    }

    #[test]
    fn pick_winner_fails_on_empty_list() {
        let r = raffle();
        assert!(r.pick_winner(7).is_err());
    }

    #[test]
    fn settle_reopens_and_resets_everything() {
        let mut r = raffle();
        let winner = Pubkey::new_unique();
        r.record_entry(winner, FEE).unwrap();
        r.record_entry(Pubkey::new_unique(), FEE).unwrap();
        r.begin_draw().unwrap();

        r.settle(winner, 90);

        assert_eq!(r.raffle_state, RaffleState::Open);
        assert!(r.players.is_empty());
        assert_eq!(r.recent_winner, Some(winner));
        assert_eq!(r.pending_request_id, None);
        assert_eq!(r.last_draw_time, 90);

        // reset restarts the interval clock
        assert!(!r.interval_elapsed(90 + INTERVAL - 1));
        assert!(r.interval_elapsed(90 + INTERVAL));
    }

    #[test]
    fn full_round_trip_reopens_for_the_next_round() {
        let mut r = raffle();
        for _ in 0..3 {
            r.record_entry(Pubkey::new_unique(), FEE).unwrap();
        }
        r.begin_draw().unwrap();
        let winner = r.pick_winner(7).unwrap();
        r.settle(winner, INTERVAL);

        // next round accepts entries again
        r.record_entry(Pubkey::new_unique(), FEE).unwrap();
        assert_eq!(r.players.len(), 1);
    }

    #[test]
    fn state_codes_match_declared_discriminants() {
        let mut r = raffle();
        assert_eq!(r.state_code(), 0);
        r.record_entry(Pubkey::new_unique(), FEE).unwrap();
        r.begin_draw().unwrap();
        assert_eq!(r.state_code(), 1);
    }

    #[test]
    fn account_size_covers_a_full_player_list() {
        // 4-byte vec length prefix plus one pubkey per slot
        assert!(RAFFLE_ACCOUNT_SIZE > 4 + 32 * MAX_PLAYERS);
    }
}
