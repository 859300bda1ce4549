use crate::{constants::*, error::SoccerBettingError};
use anchor_lang::prelude::*;

/// Earliest time a result may be requested for a match kicking off at `start_time`.
pub fn result_request_time(start_time: i64) -> Result<i64> {
    start_time
        .checked_add(MATCH_DURATION_SECS)
        .ok_or(SoccerBettingError::Overflow.into())
}

/// Earliest time a match may be finalized once its result was delivered at `delivered_at`.
pub fn resolution_time(delivered_at: i64) -> Result<i64> {
    delivered_at
        .checked_add(RESULT_REQUEST_DELAY_SECS)
        .ok_or(SoccerBettingError::Overflow.into())
}
