use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    #[msg("Entry fee must be greater than zero")]
    InvalidEntryFee,
    #[msg("Draw interval must be greater than zero")]
    InvalidInterval,
    #[msg("Callback gas limit must be greater than zero")]
    InvalidCallbackGasLimit,
    #[msg("Entry value is below the entry fee")]
    SendMoreToEnterRaffle,
    #[msg("Raffle is not open for entries")]
    RaffleNotOpen,
    #[msg("Player capacity for this raffle has been reached")]
    PlayerLimitReached,
    #[msg("Vault transfer failed")]
    TransferFailed,
    #[msg("Upkeep is not needed")]
    UpkeepNotNeeded,
    #[msg("Draw interval has not elapsed")]
    IntervalNotElapsed,
    #[msg("Raffle is not awaiting randomness")]
    RaffleNotCalculating,
    #[msg("Only the configured VRF authority may fulfill requests")]
    OnlyVrfAuthority,
    #[msg("Fulfillment does not match the pending request")]
    RequestIdMismatch,
    #[msg("Fulfillment carried no random words")]
    NoRandomWords,
    #[msg("No players are entered in the raffle")]
    NoPlayers,
    #[msg("Winner account does not match the drawn player")]
    WinnerAccountMismatch,
    #[msg("Prize pool is empty")]
    PrizePoolEmpty,
}
