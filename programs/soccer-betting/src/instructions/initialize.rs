use crate::{constants::*, error::SoccerBettingError, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + Config::INIT_SPACE,
        seeds = [CONFIG_SEED.as_bytes()],
        bump
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn validate(&self, keeper_authorities: &[Pubkey]) -> Result<()> {
        require!(
            !keeper_authorities.is_empty(),
            SoccerBettingError::NoKeeperAuthorities
        );

        require!(
            keeper_authorities.len() <= MAX_KEEPER_AUTHORITIES,
            SoccerBettingError::MaxKeeperAuthoritiesReached
        );

        Ok(())
    }
}

pub fn handler(
    ctx: Context<Initialize>,
    keeper_authorities: Vec<Pubkey>,
    oracle_authority: Pubkey,
    token_mint: Pubkey,
    treasury: Pubkey,
) -> Result<()> {
    // validate
    ctx.accounts.validate(&keeper_authorities)?;

    let config = &mut ctx.accounts.config;

    // set fields
    config.admin = ctx.accounts.signer.key();
    config.keeper_authorities = keeper_authorities;
    config.oracle_authority = oracle_authority;
    config.token_mint = token_mint;
    config.treasury = treasury;
    config.status = ProgramStatus::Active;
    config.request_counter = 0;
    config.version = 0;
    config.bump = ctx.bumps.config;

    Ok(())
}
