use crate::{constants::*, error::SoccerBettingError, state::*, utils::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(bettor: Pubkey)]
pub struct GetUserBets<'info> {
    #[account(
        seeds = [BETTOR_SEED.as_bytes(), bettor.as_ref()],
        bump = bettor_account.bump
    )]
    pub bettor_account: Account<'info, Bettor>,
}

/// Returns one page of the bettor's history: bettor indices `offset + 1` up to
/// `offset + limit`, capped at `Bettor.total_bets`. Every bet of the page is passed as a
/// remaining account pair `(bet, match)`, in any order. Paging over both views covers
/// the whole history.
pub fn handler(
    ctx: Context<GetUserBets>,
    bettor: Pubkey,
    offset: u64,
    limit: u64,
    view: BetView,
) -> Result<Vec<BetRecord>> {
    let page = BetPage::new(offset, limit, ctx.accounts.bettor_account.total_bets)?;
    let remaining_accounts = ctx.remaining_accounts;
    require!(
        remaining_accounts.len() % 2 == 0 && (remaining_accounts.len() / 2) as u64 == page.len,
        SoccerBettingError::InvalidRemainingAccountsLength
    );

    let mut entries = Vec::with_capacity(remaining_accounts.len() / 2);
    for pair in remaining_accounts.chunks(2) {
        let bet_ai = &pair[0];
        let match_ai = &pair[1];

        require_keys_eq!(
            *bet_ai.owner,
            *ctx.program_id,
            SoccerBettingError::InvalidBetAccount
        );
        require_keys_eq!(
            *match_ai.owner,
            *ctx.program_id,
            SoccerBettingError::InvalidMatchAccount
        );

        let bet = {
            let data = bet_ai.try_borrow_data()?;
            Bet::try_deserialize(&mut &data[..])
                .map_err(|_| SoccerBettingError::InvalidBetAccountData)?
        };
        require_keys_eq!(bet.bettor, bettor, SoccerBettingError::InvalidBetAccount);
        require_keys_eq!(
            bet.match_account,
            match_ai.key(),
            SoccerBettingError::InvalidMatchAccount
        );

        let match_account = {
            let data = match_ai.try_borrow_data()?;
            Match::try_deserialize(&mut &data[..])
                .map_err(|_| SoccerBettingError::InvalidMatchAccount)?
        };

        entries.push((bet, match_account.state));
    }

    select_bets(entries, page, view)
}
