use crate::{constants::*, error::SoccerBettingError, events::*, state::*, utils::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct FulfillResult<'info> {
    pub signer: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: may not exist; decoded in the handler so an unknown id gets its own error
    #[account(
        mut,
        seeds = [REQUEST_SEED.as_bytes(), &request_id.to_le_bytes()],
        bump
    )]
    pub oracle_request: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [MATCH_SEED.as_bytes(), &match_account.match_id.to_le_bytes()],
        bump = match_account.bump
    )]
    pub match_account: Account<'info, Match>,
}

impl<'info> FulfillResult<'info> {
    pub fn validate(&self, request_id: u64) -> Result<()> {
        require_keys_eq!(
            self.signer.key(),
            self.config.oracle_authority,
            SoccerBettingError::UnauthorizedOracle
        );

        validate_request_issued(
            request_id,
            self.config.request_counter,
            self.oracle_request.owner,
            &crate::ID,
        )?;

        Ok(())
    }
}

pub fn handler(ctx: Context<FulfillResult>, request_id: u64, outcome: u8) -> Result<()> {
    // validate
    ctx.accounts.validate(request_id)?;
    let result = MatchResult::try_from(outcome)?;

    let request_ai = ctx.accounts.oracle_request.to_account_info();
    let mut oracle_request: OracleRequest = {
        let data = request_ai.try_borrow_data()?;
        OracleRequest::try_deserialize(&mut &data[..])
            .map_err(|_| SoccerBettingError::UnknownRequestId)?
    };

    require!(
        oracle_request.request_id == request_id && !oracle_request.fulfilled,
        SoccerBettingError::UnknownRequestId
    );

    let match_account = &mut ctx.accounts.match_account;
    require_keys_eq!(
        oracle_request.match_account,
        match_account.key(),
        SoccerBettingError::InvalidMatchAccount
    );

    let now = Clock::get()?.unix_timestamp;

    // set match fields; state stays ResultRequested until upkeep resolves it
    match_account.deliver_result(request_id, result, now)?;

    // set request fields
    oracle_request.fulfilled = true;
    oracle_request.result = Some(result);
    oracle_request.fulfilled_at = Some(now);
    {
        let mut data = request_ai.try_borrow_mut_data()?;
        oracle_request.try_serialize(&mut &mut data[..])?;
    }

    emit!(ResultDelivered {
        match_id: match_account.match_id,
        request_id,
        result,
    });

    Ok(())
}
