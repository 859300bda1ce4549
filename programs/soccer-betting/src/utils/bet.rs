use crate::{constants::*, error::SoccerBettingError, state::*};
use anchor_lang::prelude::*;

/// Which half of a bettor's history a query asks for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BetView {
    Active,
    Resolved,
}

impl BetView {
    pub fn includes(&self, state: MatchState) -> bool {
        match self {
            BetView::Active => state != MatchState::Resolved,
            BetView::Resolved => state == MatchState::Resolved,
        }
    }
}

/// A window of a bettor's history: bettor indices `first..first + len`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BetPage {
    pub first: u64,
    pub len: u64,
}

impl BetPage {
    /// Clamps `offset`/`limit` to the bettor's `total_bets`. An offset past the end
    /// gives an empty page.
    pub fn new(offset: u64, limit: u64, total_bets: u64) -> Result<Self> {
        require!(
            limit > 0 && limit <= MAX_BETS_PER_PAGE,
            SoccerBettingError::InvalidPageLimit
        );

        let first = offset.checked_add(1).ok_or(SoccerBettingError::Overflow)?;
        let len = total_bets.saturating_sub(offset).min(limit);
        Ok(Self { first, len })
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub fn is_winning_bet(predicted: MatchResult, final_result: Option<MatchResult>) -> bool {
    final_result == Some(predicted)
}

/// Filters one page of a bettor's bets by the state of their match, ordered by
/// `bettor_index`. The entries must be exactly the bets of the page, in any order.
pub fn select_bets(
    mut entries: Vec<(Bet, MatchState)>,
    page: BetPage,
    view: BetView,
) -> Result<Vec<BetRecord>> {
    require!(
        entries.len() as u64 == page.len,
        SoccerBettingError::InvalidRemainingAccountsLength
    );

    entries.sort_by_key(|(bet, _)| bet.bettor_index);
    for (position, (bet, _)) in entries.iter().enumerate() {
        require!(
            Some(bet.bettor_index) == page.first.checked_add(position as u64),
            SoccerBettingError::InvalidRemainingAccountsLength
        );
    }

    Ok(entries
        .iter()
        .filter(|(_, state)| view.includes(*state))
        .map(|(bet, _)| BetRecord::from(bet))
        .collect())
}

/// Checks that `bet_key` is the bet PDA with id `expected_id` of `match_key`, and that
/// the decoded bet agrees.
pub fn verify_bet_address(
    bet_key: &Pubkey,
    bet: &Bet,
    match_key: &Pubkey,
    expected_id: u64,
    program_id: &Pubkey,
) -> Result<()> {
    let expected_pda = Pubkey::create_program_address(
        &[
            BET_SEED.as_bytes(),
            match_key.as_ref(),
            &expected_id.to_le_bytes(),
            &[bet.bump],
        ],
        program_id,
    )
    .map_err(|_| SoccerBettingError::InvalidBetAccount)?;
    require_keys_eq!(*bet_key, expected_pda, SoccerBettingError::InvalidBetAccount);
    require!(
        bet.id == expected_id && bet.match_account == *match_key,
        SoccerBettingError::InvalidBetAccount
    );
    Ok(())
}

/// Number of `(bet, token account)` pairs in a settlement batch. The batch has to fit
/// between the cursor and the last bet of the match.
pub fn validate_settlement_batch(accounts_len: usize, settled: u64, total: u64) -> Result<u64> {
    require!(
        accounts_len > 0 && accounts_len % 2 == 0 && accounts_len / 2 <= MAX_SETTLE_BATCH,
        SoccerBettingError::InvalidRemainingAccountsLength
    );

    let pairs = (accounts_len / 2) as u64;
    let end = settled
        .checked_add(pairs)
        .ok_or(SoccerBettingError::Overflow)?;
    require!(end <= total, SoccerBettingError::InvalidRemainingAccountsLength);
    Ok(pairs)
}

/// Settles one bet of a resolved match. Returns the payout of a winner that has not been
/// paid yet. Losers and bets already claimed return `None` and are left untouched.
pub fn settle_bet(match_account: &mut Match, bet: &mut Bet) -> Result<Option<u64>> {
    require!(
        match_account.state == MatchState::Resolved,
        SoccerBettingError::InvalidStateTransition
    );
    require!(
        bet.match_id == match_account.match_id,
        SoccerBettingError::InvalidBetAccount
    );

    if bet.claimed || !is_winning_bet(bet.result, match_account.result) {
        return Ok(None);
    }

    let payout = match_account.payout_for(bet.result, bet.amount)?;
    match_account.record_payout(payout)?;
    bet.claimed = true;
    bet.payout = payout;
    Ok(Some(payout))
}
