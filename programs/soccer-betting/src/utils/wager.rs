use crate::{constants::*, error::SoccerBettingError};
use anchor_lang::prelude::*;

pub fn validate_wager_amount(amount: u64) -> Result<()> {
    require!(amount >= MIN_WAGER, SoccerBettingError::WagerBelowMinimum);
    require!(amount <= MAX_WAGER, SoccerBettingError::WagerAboveMaximum);
    Ok(())
}
