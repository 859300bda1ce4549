use crate::error::SoccerBettingError;
use anchor_lang::prelude::*;

/// Share of the whole pool owed to a winning stake: `stake * total_pool / winning_pool`,
/// rounded down. The remainder stays in the vault.
pub fn calculate_payout(stake: u64, total_pool: u64, winning_pool: u64) -> Result<u64> {
    require!(winning_pool > 0, SoccerBettingError::Underflow);

    let payout = (stake as u128)
        .checked_mul(total_pool as u128)
        .ok_or(SoccerBettingError::Overflow)?
        .checked_div(winning_pool as u128)
        .ok_or(SoccerBettingError::Underflow)?;

    u64::try_from(payout).map_err(|_| SoccerBettingError::Overflow.into())
}
