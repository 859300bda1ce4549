use anchor_lang::prelude::*;

#[error_code]
pub enum SoccerBettingError {
    // General Program Errors
    #[msg("Unauthorized action for this account")]
    Unauthorized,

    #[msg("Program is currently paused")]
    ProgramPaused,

    #[msg("Program is already paused")]
    AlreadyPaused,

    #[msg("Program is already active")]
    AlreadyActive,

    // Configuration Errors
    #[msg("Keeper authorities list cannot be empty")]
    NoKeeperAuthorities,

    #[msg("Keeper authorities list exceeds the maximum length")]
    MaxKeeperAuthoritiesReached,

    #[msg("Keeper is not authorized")]
    UnauthorizedKeeper,

    #[msg("Signer is not the configured oracle authority")]
    UnauthorizedOracle,

    #[msg("Token mint does not match program configuration")]
    InvalidMint,

    #[msg("Treasury does not match program configuration")]
    InvalidTreasury,

    // Betting Errors
    #[msg("Bet amount must be greater than or equal to MIN_WAGER")]
    WagerBelowMinimum,

    #[msg("Bet amount must be less than or equal to MAX_WAGER")]
    WagerAboveMaximum,

    #[msg("Betting on this match is closed")]
    BettingClosed,

    #[msg("Outcome must be 0 (Draw), 1 (Home) or 2 (Away)")]
    InvalidOutcome,

    // Match Lifecycle Errors
    #[msg("Match is not in a state that allows this transition")]
    InvalidStateTransition,

    #[msg("Request id was not issued by this program or is already fulfilled")]
    UnknownRequestId,

    #[msg("Upkeep payload is stale or invalid")]
    StaleOrInvalidAction,

    #[msg("Winning bets of this match are not all settled yet")]
    SettlementPending,

    // Account Errors
    #[msg("Match account does not match the request")]
    InvalidMatchAccount,

    #[msg("Invalid bet account")]
    InvalidBetAccount,

    #[msg("Bet account data could not be decoded")]
    InvalidBetAccountData,

    #[msg("Token account does not belong to the bettor")]
    InvalidTokenAccount,

    #[msg("Unexpected number of remaining accounts")]
    InvalidRemainingAccountsLength,

    #[msg("Page limit must be between 1 and MAX_BETS_PER_PAGE")]
    InvalidPageLimit,

    #[msg("Vault holds no residue to sweep")]
    NothingToSweep,

    // Math Errors
    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Arithmetic underflow")]
    Underflow,
}
