use crate::{constants::*, error::SoccerBettingError, events::*, state::*};
use anchor_lang::prelude::*;

/// Status the program moves to, rejecting a request that would not change it.
pub fn next_program_status(current: ProgramStatus, paused: bool) -> Result<ProgramStatus> {
    match (current, paused) {
        (ProgramStatus::Active, true) => Ok(ProgramStatus::Paused),
        (ProgramStatus::Paused, false) => Ok(ProgramStatus::Active),
        (ProgramStatus::Paused, true) => err!(SoccerBettingError::AlreadyPaused),
        (ProgramStatus::Active, false) => err!(SoccerBettingError::AlreadyActive),
    }
}

#[derive(Accounts)]
pub struct SetProgramStatus<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump,
        constraint = config.admin == admin.key() @ SoccerBettingError::Unauthorized
    )]
    pub config: Account<'info, Config>,
}

pub fn handler(ctx: Context<SetProgramStatus>, paused: bool) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.status = next_program_status(config.status, paused)?;

    let admin = ctx.accounts.admin.key();
    let config_key = config.key();
    match config.status {
        ProgramStatus::Paused => emit!(ProgramPaused {
            admin,
            config: config_key,
        }),
        ProgramStatus::Active => emit!(ProgramUnpaused {
            admin,
            config: config_key,
        }),
    }

    Ok(())
}
