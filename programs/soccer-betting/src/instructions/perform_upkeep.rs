use crate::{constants::*, error::SoccerBettingError, events::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_spl::token::{transfer, Token, TokenAccount, Transfer};

/// Request id the oracle request PDA is derived from: the match's issued request once
/// there is one, otherwise the next id the config would hand out.
pub fn upkeep_request_id(request_counter: u64, issued: Option<u64>) -> u64 {
    issued.unwrap_or(request_counter.saturating_add(1))
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [MATCH_SEED.as_bytes(), &match_account.match_id.to_le_bytes()],
        bump = match_account.bump
    )]
    pub match_account: Account<'info, Match>,

    #[account(
        init_if_needed,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + OracleRequest::INIT_SPACE,
        seeds = [
            REQUEST_SEED.as_bytes(),
            &upkeep_request_id(config.request_counter, match_account.request_id).to_le_bytes()
        ],
        bump
    )]
    pub oracle_request: Account<'info, OracleRequest>,

    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), match_account.key().as_ref()],
        bump = match_account.vault_bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> PerformUpkeep<'info> {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.config.status == ProgramStatus::Active,
            SoccerBettingError::ProgramPaused
        );

        require!(
            self.config.keeper_authorities.contains(&self.signer.key()),
            SoccerBettingError::UnauthorizedKeeper
        );

        Ok(())
    }
}

pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, PerformUpkeep<'info>>,
    perform_data: Vec<u8>,
) -> Result<()> {
    // validate
    ctx.accounts.validate()?;

    // re-check the payload, the match may have moved on since check_upkeep
    let payload = UpkeepPayload::decode(&perform_data)?;
    let now = Clock::get()?.unix_timestamp;
    validate_upkeep(&payload, &ctx.accounts.match_account, now)?;

    match payload.action {
        UpkeepAction::RequestResult => request_result(ctx, now),
        UpkeepAction::Resolve => resolve_match(ctx, now),
        UpkeepAction::SettleBets => settle_bets(ctx),
    }
}

fn request_result<'info>(
    ctx: Context<'_, '_, 'info, 'info, PerformUpkeep<'info>>,
    now: i64,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let match_account = &mut ctx.accounts.match_account;
    let oracle_request = &mut ctx.accounts.oracle_request;

    let request_id = config
        .request_counter
        .checked_add(1)
        .ok_or(SoccerBettingError::Overflow)?;

    // set match fields
    match_account.mark_result_requested(request_id, now)?;

    // set config fields
    config.request_counter = request_id;

    // set request fields
    oracle_request.request_id = request_id;
    oracle_request.match_account = match_account.key();
    oracle_request.match_id = match_account.match_id;
    oracle_request.fulfilled = false;
    oracle_request.result = None;
    oracle_request.requested_at = now;
    oracle_request.fulfilled_at = None;
    oracle_request.bump = ctx.bumps.oracle_request;

    // the oracle network picks the request up from this event
    emit!(ResultRequested {
        match_id: match_account.match_id,
        request_id,
    });

    Ok(())
}

fn resolve_match<'info>(
    ctx: Context<'_, '_, 'info, 'info, PerformUpkeep<'info>>,
    now: i64,
) -> Result<()> {
    let match_account = &mut ctx.accounts.match_account;
    let oracle_request = &ctx.accounts.oracle_request;

    require!(
        oracle_request.fulfilled
            && oracle_request.match_account == match_account.key()
            && match_account.request_id == Some(oracle_request.request_id),
        SoccerBettingError::InvalidMatchAccount
    );

    let result = match_account.mark_resolved(now)?;
    let match_id = match_account.match_id;

    emit!(MatchResolved { match_id, result });

    if match_account.pool_for(result) == 0 {
        msg!(
            "Match {} resolved with no winning bets, pool of {} stays in the vault",
            match_id,
            match_account.total_wager_amount
        );
    }

    Ok(())
}

/// Pays the next batch of bets, taken in id order from the settlement cursor. Remaining
/// accounts are `(bet, bettor token account)` pairs.
fn settle_bets<'info>(ctx: Context<'_, '_, 'info, 'info, PerformUpkeep<'info>>) -> Result<()> {
    let match_account = &mut ctx.accounts.match_account;
    let match_key = match_account.key();
    let match_id = match_account.match_id;
    let remaining_accounts = ctx.remaining_accounts;

    let batch_len = validate_settlement_batch(
        remaining_accounts.len(),
        match_account.settled_bets,
        match_account.total_bets,
    )?;
    let first_id = match_account
        .settled_bets
        .checked_add(1)
        .ok_or(SoccerBettingError::Overflow)?;

    let match_seeds = &[
        MATCH_SEED.as_bytes(),
        &match_id.to_le_bytes(),
        &[match_account.bump],
    ];
    let match_signer = &[&match_seeds[..]];

    for (index, pair) in remaining_accounts.chunks(2).enumerate() {
        let bet_ai = &pair[0];
        let token_ai = &pair[1];

        // ownership check
        require_keys_eq!(
            *bet_ai.owner,
            *ctx.program_id,
            SoccerBettingError::InvalidBetAccount
        );
        require!(bet_ai.is_writable, SoccerBettingError::InvalidBetAccount);

        let mut bet: Bet = {
            let data = bet_ai.try_borrow_data()?;
            Bet::try_deserialize(&mut &data[..])
                .map_err(|_| SoccerBettingError::InvalidBetAccountData)?
        };

        // validate bet account
        let expected_id = first_id
            .checked_add(index as u64)
            .ok_or(SoccerBettingError::Overflow)?;
        verify_bet_address(bet_ai.key, &bet, &match_key, expected_id, ctx.program_id)?;

        if bet.claimed || !is_winning_bet(bet.result, match_account.result) {
            continue;
        }

        let bettor_token_account = Account::<TokenAccount>::try_from(token_ai)
            .map_err(|_| SoccerBettingError::InvalidTokenAccount)?;
        require_keys_eq!(
            bettor_token_account.owner,
            bet.bettor,
            SoccerBettingError::InvalidTokenAccount
        );
        require_keys_eq!(
            bettor_token_account.mint,
            ctx.accounts.vault.mint,
            SoccerBettingError::InvalidTokenAccount
        );

        // mark claimed and account for the payout before moving any tokens
        let Some(payout) = settle_bet(match_account, &mut bet)? else {
            continue;
        };
        {
            let mut data = bet_ai.try_borrow_mut_data()?;
            bet.try_serialize(&mut &mut data[..])
                .map_err(|_| SoccerBettingError::InvalidBetAccountData)?;
        }

        // transfer from vault to bettor
        if payout > 0 {
            let transfer_accounts = Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: token_ai.clone(),
                authority: match_account.to_account_info(),
            };
            let transfer_ctx = CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                transfer_accounts,
                match_signer,
            );
            transfer(transfer_ctx, payout)?;
        }

        emit!(WinningsClaimed {
            match_id,
            bettor: bet.bettor,
            amount: payout,
        });
    }

    // accumulate progress
    match_account.advance_settlement(batch_len)?;
    msg!(
        "Match {} settled {}/{} bets",
        match_id,
        match_account.settled_bets,
        match_account.total_bets
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upkeep_request_id() {
        // Fresh match: derive the next id
        assert_eq!(upkeep_request_id(0, None), 1);
        assert_eq!(upkeep_request_id(41, None), 42);
        // Requested match: keep the issued id
        assert_eq!(upkeep_request_id(41, Some(7)), 7);
    }
}
