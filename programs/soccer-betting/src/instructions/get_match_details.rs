use crate::{constants::*, state::*};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct MatchDetails {
    pub start_time: i64,
    pub state: MatchState,
    pub result: Option<MatchResult>,
    pub total_wager_amount: u64,
}

impl From<&Match> for MatchDetails {
    fn from(match_account: &Match) -> Self {
        Self {
            start_time: match_account.start_time,
            state: match_account.state,
            result: match_account.result,
            total_wager_amount: match_account.total_wager_amount,
        }
    }
}

#[derive(Accounts)]
#[instruction(match_id: u64)]
pub struct GetMatchDetails<'info> {
    #[account(
        seeds = [MATCH_SEED.as_bytes(), &match_id.to_le_bytes()],
        bump = match_account.bump
    )]
    pub match_account: Account<'info, Match>,
}

pub fn handler(ctx: Context<GetMatchDetails>, _match_id: u64) -> Result<MatchDetails> {
    Ok(MatchDetails::from(&*ctx.accounts.match_account))
}
