use crate::{constants::*, error::SoccerBettingError, state::*};
use anchor_lang::prelude::*;

/// Opaque data handed from `check_upkeep` to `perform_upkeep`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct UpkeepPayload {
    pub match_id: u64,
    pub action: UpkeepAction,
}

impl UpkeepPayload {
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.serialize(&mut data)
            .map_err(|_| SoccerBettingError::StaleOrInvalidAction)?;
        Ok(data)
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::try_from_slice(data).map_err(|_| SoccerBettingError::StaleOrInvalidAction.into())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    pub perform_data: Vec<u8>,
}

impl UpkeepCheck {
    pub fn idle() -> Self {
        Self {
            upkeep_needed: false,
            perform_data: Vec::new(),
        }
    }
}

/// Picks the overdue match with the earliest deadline. Ties go to the earlier candidate.
pub fn select_upkeep<'a>(
    candidates: impl IntoIterator<Item = &'a Match>,
    now: i64,
) -> Result<Option<UpkeepPayload>> {
    let mut selected: Option<(i64, UpkeepPayload)> = None;

    for candidate in candidates {
        let Some((deadline, action)) = candidate.next_deadline()? else {
            continue;
        };
        if now < deadline {
            continue;
        }
        if selected.map_or(true, |(best, _)| deadline < best) {
            selected = Some((
                deadline,
                UpkeepPayload {
                    match_id: candidate.match_id,
                    action,
                },
            ));
        }
    }

    Ok(selected.map(|(_, payload)| payload))
}

/// Re-checks a payload against the current state of its match.
pub fn validate_upkeep(payload: &UpkeepPayload, match_account: &Match, now: i64) -> Result<()> {
    require!(
        payload.match_id == match_account.match_id,
        SoccerBettingError::StaleOrInvalidAction
    );
    require!(
        match_account.due_action(now)? == Some(payload.action),
        SoccerBettingError::StaleOrInvalidAction
    );
    Ok(())
}

/// Checks that `request_id` was handed out by upkeep and that its request account lives
/// under this program.
pub fn validate_request_issued(
    request_id: u64,
    request_counter: u64,
    request_owner: &Pubkey,
    program_id: &Pubkey,
) -> Result<()> {
    require!(
        request_id > 0 && request_id <= request_counter,
        SoccerBettingError::UnknownRequestId
    );
    require_keys_eq!(
        *request_owner,
        *program_id,
        SoccerBettingError::UnknownRequestId
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: i64 = 1_700_000_000;

    fn active_match(match_id: u64, start_time: i64) -> Match {
        let mut m = Match::default();
        m.open(match_id, start_time, T, Pubkey::new_unique(), 254, 255);
        m
    }

    fn delivered_match(match_id: u64, start_time: i64, delivered_at: i64) -> Match {
        let mut m = active_match(match_id, start_time);
        m.mark_result_requested(match_id, start_time + MATCH_DURATION_SECS)
            .unwrap();
        m.deliver_result(match_id, MatchResult::Home, delivered_at)
            .unwrap();
        m
    }

    #[test]
    fn test_nothing_due() {
        let matches = vec![active_match(1, T + 3_600), active_match(2, T + 7_200)];
        assert_eq!(select_upkeep(&matches, T).unwrap(), None);
        assert_eq!(select_upkeep(Vec::<&Match>::new(), T).unwrap(), None);
    }

    #[test]
    fn test_overdue_active_match_requests_result() {
        let matches = vec![active_match(1, T + 7_200), active_match(2, T)];
        let payload = select_upkeep(&matches, T + MATCH_DURATION_SECS + 1)
            .unwrap()
            .unwrap();
        assert_eq!(
            payload,
            UpkeepPayload {
                match_id: 2,
                action: UpkeepAction::RequestResult
            }
        );
    }

    #[test]
    fn test_earliest_deadline_wins() {
        let start = T;
        let late_kickoff = active_match(1, start + 100);
        let early_kickoff = active_match(2, start);
        let delivered = delivered_match(3, start - 10_000, start + MATCH_DURATION_SECS - 500);
        let now = start + MATCH_DURATION_SECS + 200;

        let payload = select_upkeep([&late_kickoff, &early_kickoff, &delivered], now)
            .unwrap()
            .unwrap();
        assert_eq!(payload.match_id, 3);
        assert_eq!(payload.action, UpkeepAction::Resolve);

        let payload = select_upkeep([&late_kickoff, &early_kickoff], now)
            .unwrap()
            .unwrap();
        assert_eq!(payload.match_id, 2);
    }

    #[test]
    fn test_waiting_on_oracle_is_not_due() {
        let mut m = active_match(1, T);
        m.mark_result_requested(1, T + MATCH_DURATION_SECS).unwrap();
        assert_eq!(select_upkeep([&m], T + 1_000_000).unwrap(), None);
    }

    #[test]
    fn test_settling_delay_gates_resolve() {
        let delivered_at = T + MATCH_DURATION_SECS + 10;
        let m = delivered_match(1, T, delivered_at);
        assert_eq!(
            select_upkeep([&m], delivered_at + RESULT_REQUEST_DELAY_SECS - 1).unwrap(),
            None
        );
        assert_eq!(
            select_upkeep([&m], delivered_at + RESULT_REQUEST_DELAY_SECS + 1)
                .unwrap()
                .map(|p| p.action),
            Some(UpkeepAction::Resolve)
        );
    }

    #[test]
    fn test_unsettled_match_is_due_for_settlement() {
        let delivered_at = T + MATCH_DURATION_SECS;
        let mut m = active_match(1, T);
        m.record_wager(MatchResult::Home, MIN_WAGER).unwrap();
        m.mark_result_requested(1, delivered_at).unwrap();
        m.deliver_result(1, MatchResult::Home, delivered_at).unwrap();
        let resolved_at = delivered_at + RESULT_REQUEST_DELAY_SECS;
        m.mark_resolved(resolved_at).unwrap();

        let waiting = delivered_match(2, T, delivered_at + 100);
        let payload = select_upkeep([&waiting, &m], resolved_at + 200)
            .unwrap()
            .unwrap();
        assert_eq!(
            payload,
            UpkeepPayload {
                match_id: 1,
                action: UpkeepAction::SettleBets
            }
        );
        assert!(validate_upkeep(&payload, &m, resolved_at).is_ok());

        m.advance_settlement(1).unwrap();
        assert_eq!(
            validate_upkeep(&payload, &m, resolved_at).unwrap_err(),
            SoccerBettingError::StaleOrInvalidAction.into()
        );
    }

    #[test]
    fn test_request_must_be_issued() {
        let program_id = crate::ID;
        validate_request_issued(3, 3, &program_id, &program_id).unwrap();

        // Beyond the counter, zero, or never created (still a system account)
        for (request_id, owner) in [
            (4, program_id),
            (0, program_id),
            (2, anchor_lang::system_program::ID),
        ] {
            assert_eq!(
                validate_request_issued(request_id, 3, &owner, &program_id).unwrap_err(),
                SoccerBettingError::UnknownRequestId.into()
            );
        }
    }

    #[test]
    fn test_payload_decode() {
        let payload = UpkeepPayload {
            match_id: 1_208_847,
            action: UpkeepAction::Resolve,
        };
        let data = payload.encode().unwrap();
        assert_eq!(UpkeepPayload::decode(&data).unwrap(), payload);

        assert_eq!(
            UpkeepPayload::decode(&[]).unwrap_err(),
            SoccerBettingError::StaleOrInvalidAction.into()
        );
        assert_eq!(
            UpkeepPayload::decode(&[1, 0, 0, 0, 0, 0, 0, 0, 9]).unwrap_err(),
            SoccerBettingError::StaleOrInvalidAction.into()
        );
    }

    #[test]
    fn test_stale_payload_rejected() {
        let now = T + MATCH_DURATION_SECS;
        let mut m = active_match(1, T);
        let payload = select_upkeep([&m], now).unwrap().unwrap();
        assert!(validate_upkeep(&payload, &m, now).is_ok());

        // Someone else already advanced the match
        m.mark_result_requested(1, now).unwrap();
        assert_eq!(
            validate_upkeep(&payload, &m, now).unwrap_err(),
            SoccerBettingError::StaleOrInvalidAction.into()
        );

        // Payload for a different match
        let other = UpkeepPayload {
            match_id: 2,
            action: UpkeepAction::RequestResult,
        };
        let fresh = active_match(1, T);
        assert_eq!(
            validate_upkeep(&other, &fresh, now).unwrap_err(),
            SoccerBettingError::StaleOrInvalidAction.into()
        );
    }
}
