use crate::{constants::*, error::SoccerBettingError, state::*, utils::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,
}

/// Read-only scan over the candidate matches passed as remaining accounts. Accounts that
/// are not match accounts of this program are skipped.
///
/// The program keeps no index of open matches, so the keeper discovers candidates off
/// chain with `getProgramAccounts` filtered on the `Match` discriminator. A memcmp on
/// the `state` byte narrows that to one phase. It then passes up to `MAX_UPKEEP_SCAN`
/// of them here. No candidates means no upkeep is reported.
pub fn handler(ctx: Context<CheckUpkeep>) -> Result<UpkeepCheck> {
    require!(
        ctx.remaining_accounts.len() <= MAX_UPKEEP_SCAN,
        SoccerBettingError::InvalidRemainingAccountsLength
    );

    let mut candidates: Vec<Match> = Vec::with_capacity(ctx.remaining_accounts.len());
    for match_ai in ctx.remaining_accounts.iter() {
        if match_ai.owner != ctx.program_id {
            continue;
        }
        let data = match_ai.try_borrow_data()?;
        if let Ok(candidate) = Match::try_deserialize(&mut &data[..]) {
            candidates.push(candidate);
        }
    }

    let now = Clock::get()?.unix_timestamp;
    match select_upkeep(&candidates, now)? {
        Some(payload) => Ok(UpkeepCheck {
            upkeep_needed: true,
            perform_data: payload.encode()?,
        }),
        None => Ok(UpkeepCheck::idle()),
    }
}
