use anchor_lang::prelude::*;

/// PDA Seeds
#[constant]
pub const CONFIG_SEED: &str = "config";
#[constant]
pub const MATCH_SEED: &str = "match";
#[constant]
pub const VAULT_SEED: &str = "vault";
#[constant]
pub const BET_SEED: &str = "bet";
#[constant]
pub const BETTOR_SEED: &str = "bettor";
#[constant]
pub const REQUEST_SEED: &str = "request";

pub const DISCRIMINATOR_SIZE: u8 = 8;

/// Wager bounds, in the stake token's smallest unit
#[constant]
pub const MIN_WAGER: u64 = 10_000;
#[constant]
pub const MAX_WAGER: u64 = 10_000_000;

/// Betting window measured from kickoff; a result may be requested once it has elapsed
#[constant]
pub const MATCH_DURATION_SECS: i64 = 2 * 60 * 60;

/// Settling delay between oracle delivery and finalization
#[constant]
pub const RESULT_REQUEST_DELAY_SECS: i64 = 60;

pub const MAX_KEEPER_AUTHORITIES: usize = 10;
pub const MAX_UPKEEP_SCAN: usize = 16;

/// Bets settled per upkeep call; each bet travels with its bettor's token account
pub const MAX_SETTLE_BATCH: usize = 8;

/// Records per bet history page; keeps the return data under 1 KiB
pub const MAX_BETS_PER_PAGE: u64 = 12;

/// Enum for program status flags
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum ProgramStatus {
    Active,
    Paused,
}

/// Enum for fixture outcomes, encoded on the wire as 0 = Draw, 1 = Home, 2 = Away
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum MatchResult {
    Draw,
    Home,
    Away,
}

impl MatchResult {
    pub fn pool_index(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<u8> for MatchResult {
    type Error = crate::error::SoccerBettingError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(MatchResult::Draw),
            1 => Ok(MatchResult::Home),
            2 => Ok(MatchResult::Away),
            _ => Err(crate::error::SoccerBettingError::InvalidOutcome),
        }
    }
}

/// Enum for the single transition an upkeep call performs
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum UpkeepAction {
    RequestResult,
    Resolve,
    SettleBets,
}
