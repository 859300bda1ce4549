use crate::{constants::*, error::SoccerBettingError, utils::*};
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Match {
    // --- Identity ---
    pub match_id: u64,       // Fixture identifier assigned by the fixture provider.
    pub start_time: i64,     // Scheduled kickoff, fixed by the first bet.
    pub vault: Pubkey,       // The token vault holding the stakes for this match.

    // --- State ---
    pub is_initialized: bool,          // Set once by the first bet; later bets leave start_time alone.
    pub state: MatchState,             // Active -> ResultRequested -> Resolved.
    pub result: Option<MatchResult>,   // Final result, set only once Resolved.
    pub total_wager_amount: u64,       // Sum of every stake placed on this match.
    pub pools: [u64; 3],               // Stake per outcome, indexed by MatchResult.
    pub total_bets: u64,               // Number of bets; bet ids run 1..=total_bets.

    // --- Oracle ---
    pub request_id: Option<u64>,
    pub requested_at: Option<i64>,
    pub delivered_result: Option<MatchResult>,
    pub delivered_at: Option<i64>,

    // --- Settlement ---
    pub total_paid_out: u64,
    pub winning_bets: u64,
    pub settled_bets: u64,             // Settlement cursor; bets 1..=settled_bets are settled.

    // --- Metadata ---
    pub created_at: i64,
    pub resolved_at: Option<i64>,
    pub vault_bump: u8,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Default, Debug)]
pub enum MatchState {
    #[default]
    Active,          // Accepting bets until the betting window elapses
    ResultRequested, // Waiting on the oracle, then the settling delay
    Resolved,        // Final result recorded; winners are paid in batches
}

impl Match {
    /// First-write-wins upsert of the fixture parameters. Returns true when this call
    /// created the match.
    pub fn open(
        &mut self,
        match_id: u64,
        start_time: i64,
        now: i64,
        vault: Pubkey,
        vault_bump: u8,
        bump: u8,
    ) -> bool {
        if self.is_initialized {
            return false;
        }

        self.match_id = match_id;
        self.start_time = start_time;
        self.vault = vault;
        self.is_initialized = true;
        self.state = MatchState::Active;
        self.created_at = now;
        self.vault_bump = vault_bump;
        self.bump = bump;
        true
    }

    pub fn is_accepting_bets(&self, now: i64) -> Result<bool> {
        Ok(self.state == MatchState::Active && now < result_request_time(self.start_time)?)
    }

    pub fn ensure_accepting_bets(&self, now: i64) -> Result<()> {
        require!(
            self.is_accepting_bets(now)?,
            SoccerBettingError::BettingClosed
        );
        Ok(())
    }

    /// Adds a stake to the outcome pool and returns the id of the new bet.
    pub fn record_wager(&mut self, outcome: MatchResult, amount: u64) -> Result<u64> {
        validate_wager_amount(amount)?;

        let pool = &mut self.pools[outcome.pool_index()];
        *pool = pool.checked_add(amount).ok_or(SoccerBettingError::Overflow)?;
        self.total_wager_amount = self
            .total_wager_amount
            .checked_add(amount)
            .ok_or(SoccerBettingError::Overflow)?;
        self.total_bets = self
            .total_bets
            .checked_add(1)
            .ok_or(SoccerBettingError::Overflow)?;

        Ok(self.total_bets)
    }

    pub fn pool_for(&self, outcome: MatchResult) -> u64 {
        self.pools[outcome.pool_index()]
    }

    /// Time at which the next transition becomes allowed, if one is pending at all.
    pub fn next_deadline(&self) -> Result<Option<(i64, UpkeepAction)>> {
        match self.state {
            MatchState::Active => Ok(Some((
                result_request_time(self.start_time)?,
                UpkeepAction::RequestResult,
            ))),
            MatchState::ResultRequested => match (self.delivered_result, self.delivered_at) {
                (Some(_), Some(delivered_at)) => {
                    Ok(Some((resolution_time(delivered_at)?, UpkeepAction::Resolve)))
                }
                _ => Ok(None),
            },
            MatchState::Resolved => match self.resolved_at {
                Some(resolved_at) if !self.is_settled() => {
                    Ok(Some((resolved_at, UpkeepAction::SettleBets)))
                }
                _ => Ok(None),
            },
        }
    }

    /// True once every bet has gone through settlement.
    pub fn is_settled(&self) -> bool {
        self.settled_bets >= self.total_bets
    }

    /// The transition upkeep should perform at `now`, if any is due.
    pub fn due_action(&self, now: i64) -> Result<Option<UpkeepAction>> {
        Ok(self
            .next_deadline()?
            .filter(|(deadline, _)| now >= *deadline)
            .map(|(_, action)| action))
    }

    pub fn mark_result_requested(&mut self, request_id: u64, now: i64) -> Result<()> {
        require!(
            self.due_action(now)? == Some(UpkeepAction::RequestResult),
            SoccerBettingError::InvalidStateTransition
        );

        self.state = MatchState::ResultRequested;
        self.request_id = Some(request_id);
        self.requested_at = Some(now);
        Ok(())
    }

    pub fn deliver_result(&mut self, request_id: u64, result: MatchResult, now: i64) -> Result<()> {
        require!(
            self.state == MatchState::ResultRequested,
            SoccerBettingError::InvalidStateTransition
        );
        require!(
            self.request_id == Some(request_id) && self.delivered_result.is_none(),
            SoccerBettingError::UnknownRequestId
        );

        self.delivered_result = Some(result);
        self.delivered_at = Some(now);
        Ok(())
    }

    /// Finalizes the delivered result. Winners are paid afterwards, in bet id order, by
    /// `SettleBets` upkeep. With an empty winning pool there is nobody to pay and the
    /// cursor jumps straight to the end.
    pub fn mark_resolved(&mut self, now: i64) -> Result<MatchResult> {
        require!(
            self.due_action(now)? == Some(UpkeepAction::Resolve),
            SoccerBettingError::InvalidStateTransition
        );
        let result = self
            .delivered_result
            .ok_or(SoccerBettingError::InvalidStateTransition)?;

        self.state = MatchState::Resolved;
        self.result = Some(result);
        self.resolved_at = Some(now);
        if self.pool_for(result) == 0 {
            self.settled_bets = self.total_bets;
        }
        Ok(result)
    }

    /// Payout owed to a bet, zero for a losing or unresolved one.
    pub fn payout_for(&self, predicted: MatchResult, stake: u64) -> Result<u64> {
        match self.result {
            Some(result) if result == predicted => {
                calculate_payout(stake, self.total_wager_amount, self.pool_for(result))
            }
            _ => Ok(0),
        }
    }

    pub fn record_payout(&mut self, amount: u64) -> Result<()> {
        self.total_paid_out = self
            .total_paid_out
            .checked_add(amount)
            .ok_or(SoccerBettingError::Overflow)?;
        require!(
            self.total_paid_out <= self.total_wager_amount,
            SoccerBettingError::Overflow
        );
        self.winning_bets = self
            .winning_bets
            .checked_add(1)
            .ok_or(SoccerBettingError::Overflow)?;
        Ok(())
    }

    /// Moves the settlement cursor past a batch of `count` bets.
    pub fn advance_settlement(&mut self, count: u64) -> Result<()> {
        require!(
            self.state == MatchState::Resolved,
            SoccerBettingError::InvalidStateTransition
        );
        let settled = self
            .settled_bets
            .checked_add(count)
            .ok_or(SoccerBettingError::Overflow)?;
        require!(
            settled <= self.total_bets,
            SoccerBettingError::InvalidRemainingAccountsLength
        );
        self.settled_bets = settled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Bet;

    const T: i64 = 1_700_000_000;

    fn open_match(start_time: i64) -> Match {
        let mut m = Match::default();
        assert!(m.open(1, start_time, T, Pubkey::new_unique(), 254, 255));
        m
    }

    #[test]
    fn test_first_bet_creates_match_and_keeps_start_time() {
        let mut m = open_match(T + 3_600);
        assert_eq!(m.state, MatchState::Active);
        assert_eq!(m.start_time, T + 3_600);

        // A later call with a different nominal start time does not overwrite it
        assert!(!m.open(1, T + 99_999, T + 10, Pubkey::new_unique(), 1, 1));
        assert_eq!(m.start_time, T + 3_600);
        assert_eq!(m.created_at, T);
    }

    #[test]
    fn test_record_wager_accumulates_pools() {
        let mut m = open_match(T + 3_600);
        assert_eq!(m.record_wager(MatchResult::Home, MIN_WAGER).unwrap(), 1);
        assert_eq!(m.record_wager(MatchResult::Home, 20_000).unwrap(), 2);
        assert_eq!(m.record_wager(MatchResult::Draw, MAX_WAGER).unwrap(), 3);

        assert_eq!(m.total_wager_amount, MIN_WAGER + 20_000 + MAX_WAGER);
        assert_eq!(m.pool_for(MatchResult::Home), MIN_WAGER + 20_000);
        assert_eq!(m.pool_for(MatchResult::Draw), MAX_WAGER);
        assert_eq!(m.pool_for(MatchResult::Away), 0);
        assert_eq!(m.pools.iter().sum::<u64>(), m.total_wager_amount);
    }

    #[test]
    fn test_record_wager_rejects_out_of_bounds_without_side_effects() {
        let mut m = open_match(T + 3_600);
        assert_eq!(
            m.record_wager(MatchResult::Home, MIN_WAGER - 1).unwrap_err(),
            SoccerBettingError::WagerBelowMinimum.into()
        );
        assert_eq!(
            m.record_wager(MatchResult::Away, MAX_WAGER + 1).unwrap_err(),
            SoccerBettingError::WagerAboveMaximum.into()
        );
        assert_eq!(m.total_wager_amount, 0);
        assert_eq!(m.total_bets, 0);
    }

    #[test]
    fn test_betting_closes_when_window_elapses() {
        let m = open_match(T + 3_600);
        assert!(m.is_accepting_bets(T).unwrap());
        assert!(m.is_accepting_bets(T + 3_600 + MATCH_DURATION_SECS - 1).unwrap());
        assert!(!m.is_accepting_bets(T + 3_600 + MATCH_DURATION_SECS).unwrap());
    }

    #[test]
    fn test_bets_rejected_once_closed() {
        let mut m = open_match(T);
        m.ensure_accepting_bets(T + MATCH_DURATION_SECS - 1).unwrap();
        assert_eq!(
            m.ensure_accepting_bets(T + MATCH_DURATION_SECS).unwrap_err(),
            SoccerBettingError::BettingClosed.into()
        );

        // Closed by state as well as by time
        m.mark_result_requested(1, T + MATCH_DURATION_SECS).unwrap();
        assert_eq!(
            m.ensure_accepting_bets(T).unwrap_err(),
            SoccerBettingError::BettingClosed.into()
        );
    }

    #[test]
    fn test_result_request_is_time_gated() {
        let mut m = open_match(T + 3_600);
        let window_end = T + 3_600 + MATCH_DURATION_SECS;

        assert_eq!(m.due_action(window_end - 1).unwrap(), None);
        assert_eq!(
            m.mark_result_requested(1, window_end - 1).unwrap_err(),
            SoccerBettingError::InvalidStateTransition.into()
        );
        assert_eq!(m.state, MatchState::Active);

        assert_eq!(
            m.due_action(window_end).unwrap(),
            Some(UpkeepAction::RequestResult)
        );
        m.mark_result_requested(1, window_end).unwrap();
        assert_eq!(m.state, MatchState::ResultRequested);
        assert_eq!(m.request_id, Some(1));
    }

    #[test]
    fn test_resolution_waits_for_delivery_and_delay() {
        let mut m = open_match(T);
        m.record_wager(MatchResult::Home, MIN_WAGER).unwrap();
        let requested_at = T + MATCH_DURATION_SECS;
        m.mark_result_requested(7, requested_at).unwrap();

        // Nothing is due until the oracle delivers
        assert_eq!(m.due_action(requested_at + 10_000).unwrap(), None);
        assert_eq!(
            m.mark_resolved(requested_at + 10_000).unwrap_err(),
            SoccerBettingError::InvalidStateTransition.into()
        );

        let delivered_at = requested_at + 30;
        m.deliver_result(7, MatchResult::Home, delivered_at).unwrap();
        assert_eq!(m.state, MatchState::ResultRequested);
        assert_eq!(m.result, None);

        assert_eq!(
            m.mark_resolved(delivered_at + RESULT_REQUEST_DELAY_SECS - 1)
                .unwrap_err(),
            SoccerBettingError::InvalidStateTransition.into()
        );
        assert_eq!(
            m.mark_resolved(delivered_at + RESULT_REQUEST_DELAY_SECS).unwrap(),
            MatchResult::Home
        );
        assert_eq!(m.state, MatchState::Resolved);
        assert_eq!(m.result, Some(MatchResult::Home));
    }

    #[test]
    fn test_delivery_rejects_wrong_or_repeated_request() {
        let mut m = open_match(T);
        assert_eq!(
            m.deliver_result(1, MatchResult::Draw, T).unwrap_err(),
            SoccerBettingError::InvalidStateTransition.into()
        );

        m.mark_result_requested(3, T + MATCH_DURATION_SECS).unwrap();
        assert_eq!(
            m.deliver_result(4, MatchResult::Draw, T + MATCH_DURATION_SECS)
                .unwrap_err(),
            SoccerBettingError::UnknownRequestId.into()
        );
        m.deliver_result(3, MatchResult::Draw, T + MATCH_DURATION_SECS)
            .unwrap();
        assert_eq!(
            m.deliver_result(3, MatchResult::Away, T + MATCH_DURATION_SECS)
                .unwrap_err(),
            SoccerBettingError::UnknownRequestId.into()
        );
        assert_eq!(m.delivered_result, Some(MatchResult::Draw));
    }

    #[test]
    fn test_state_never_regresses() {
        let mut m = open_match(T);
        let request_at = T + MATCH_DURATION_SECS;
        m.mark_result_requested(1, request_at).unwrap();

        // A second request is not a valid transition
        assert!(m.mark_result_requested(2, request_at + 1).is_err());
        assert_eq!(m.state, MatchState::ResultRequested);

        m.deliver_result(1, MatchResult::Away, request_at).unwrap();
        m.mark_resolved(request_at + RESULT_REQUEST_DELAY_SECS).unwrap();

        // Resolved is terminal
        let later = request_at + 1_000_000;
        assert_eq!(m.due_action(later).unwrap(), None);
        assert!(m.mark_result_requested(3, later).is_err());
        assert!(m.mark_resolved(later).is_err());
        assert!(m.deliver_result(1, MatchResult::Home, later).is_err());
        assert_eq!(m.state, MatchState::Resolved);
        assert!(!m.is_accepting_bets(later).unwrap());
    }

    #[test]
    fn test_zero_winners_pays_nobody() {
        let mut m = open_match(T);
        m.record_wager(MatchResult::Home, MIN_WAGER).unwrap();
        m.record_wager(MatchResult::Away, MIN_WAGER).unwrap();
        m.mark_result_requested(1, T + MATCH_DURATION_SECS).unwrap();
        m.deliver_result(1, MatchResult::Draw, T + MATCH_DURATION_SECS)
            .unwrap();
        m.mark_resolved(T + MATCH_DURATION_SECS + RESULT_REQUEST_DELAY_SECS)
            .unwrap();

        assert_eq!(m.pool_for(MatchResult::Draw), 0);
        assert_eq!(m.payout_for(MatchResult::Home, MIN_WAGER).unwrap(), 0);
        assert_eq!(m.payout_for(MatchResult::Away, MIN_WAGER).unwrap(), 0);
        assert_eq!(m.total_paid_out, 0);

        // Nothing to settle, so no settlement upkeep is scheduled
        assert!(m.is_settled());
        assert_eq!(m.due_action(T + 1_000_000).unwrap(), None);
    }

    #[test]
    fn test_settlement_cursor() {
        let mut m = open_match(T);
        for _ in 0..3 {
            m.record_wager(MatchResult::Home, MIN_WAGER).unwrap();
        }
        assert_eq!(
            m.advance_settlement(1).unwrap_err(),
            SoccerBettingError::InvalidStateTransition.into()
        );

        m.mark_result_requested(1, T + MATCH_DURATION_SECS).unwrap();
        m.deliver_result(1, MatchResult::Home, T + MATCH_DURATION_SECS)
            .unwrap();
        let resolved_at = T + MATCH_DURATION_SECS + RESULT_REQUEST_DELAY_SECS;
        m.mark_resolved(resolved_at).unwrap();

        assert!(!m.is_settled());
        assert_eq!(
            m.due_action(resolved_at).unwrap(),
            Some(UpkeepAction::SettleBets)
        );

        m.advance_settlement(2).unwrap();
        assert_eq!(
            m.advance_settlement(2).unwrap_err(),
            SoccerBettingError::InvalidRemainingAccountsLength.into()
        );
        m.advance_settlement(1).unwrap();
        assert!(m.is_settled());
        assert_eq!(m.due_action(resolved_at).unwrap(), None);
    }

    #[test]
    fn test_home_versus_away_scenario() {
        // Bettor A: MAX_WAGER on Home. Bettor B: MAX_WAGER on Away. Kickoff at T + 3600.
        let mut m = open_match(T + 3_600);
        let bet_a = m.record_wager(MatchResult::Home, MAX_WAGER).unwrap();
        let bet_b = m.record_wager(MatchResult::Away, MAX_WAGER).unwrap();
        assert_eq!((bet_a, bet_b), (1, 2));

        let check_at = T + 3_600 + MATCH_DURATION_SECS + 1;
        assert_eq!(
            m.due_action(check_at).unwrap(),
            Some(UpkeepAction::RequestResult)
        );
        m.mark_result_requested(1, check_at).unwrap();
        assert_eq!(m.state, MatchState::ResultRequested);

        let delivered_at = check_at + 5;
        m.deliver_result(1, MatchResult::Home, delivered_at).unwrap();

        let resolve_at = delivered_at + RESULT_REQUEST_DELAY_SECS + 1;
        assert_eq!(
            m.due_action(resolve_at).unwrap(),
            Some(UpkeepAction::Resolve)
        );
        assert_eq!(m.mark_resolved(resolve_at).unwrap(), MatchResult::Home);

        assert_eq!(
            m.due_action(resolve_at).unwrap(),
            Some(UpkeepAction::SettleBets)
        );

        let bet = |id: u64, result: MatchResult| Bet {
            id,
            match_account: Pubkey::new_unique(),
            match_id: 1,
            bettor: Pubkey::new_unique(),
            bettor_index: 1,
            amount: MAX_WAGER,
            result,
            claimed: false,
            payout: 0,
            created_at: T,
            bump: 255,
        };
        let mut a = bet(bet_a, MatchResult::Home);
        let mut b = bet(bet_b, MatchResult::Away);

        assert_eq!(settle_bet(&mut m, &mut a).unwrap(), Some(2 * MAX_WAGER));
        assert_eq!(settle_bet(&mut m, &mut b).unwrap(), None);
        m.advance_settlement(2).unwrap();

        assert!(a.claimed);
        assert_eq!(a.payout, 2 * MAX_WAGER);
        assert!(!b.claimed);
        assert_eq!(m.total_paid_out, m.total_wager_amount);
        assert_eq!(m.winning_bets, 1);
        assert_eq!(m.due_action(resolve_at).unwrap(), None);
    }

    #[test]
    fn test_payouts_cannot_exceed_pool() {
        let mut m = open_match(T);
        m.record_wager(MatchResult::Home, MIN_WAGER).unwrap();
        m.record_payout(MIN_WAGER).unwrap();
        assert!(m.record_payout(1).is_err());
    }
}
