use crate::constants::*;
use anchor_lang::prelude::*;

#[event]
pub struct MatchCreated {
    pub match_id: u64,
    pub start_time: i64,
}

#[event]
pub struct BetPlaced {
    pub match_id: u64,
    pub bettor: Pubkey,
    pub outcome: MatchResult,
    pub amount: u64,
}

#[event]
pub struct ResultRequested {
    pub match_id: u64,
    pub request_id: u64,
}

#[event]
pub struct ResultDelivered {
    pub match_id: u64,
    pub request_id: u64,
    pub result: MatchResult,
}

#[event]
pub struct MatchResolved {
    pub match_id: u64,
    pub result: MatchResult,
}

#[event]
pub struct WinningsClaimed {
    pub match_id: u64,
    pub bettor: Pubkey,
    pub amount: u64,
}

#[event]
pub struct VaultSwept {
    pub match_id: u64,
    pub treasury: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub version: u8,
}

#[event]
pub struct ProgramPaused {
    pub admin: Pubkey,
    pub config: Pubkey,
}

#[event]
pub struct ProgramUnpaused {
    pub admin: Pubkey,
    pub config: Pubkey,
}
