use crate::{constants::*, error::SoccerBettingError, events::*, state::*};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,
}

impl<'info> UpdateConfig<'info> {
    pub fn validate(&self, new_keeper_authorities: &Option<Vec<Pubkey>>) -> Result<()> {
        require_keys_eq!(
            self.signer.key(),
            self.config.admin,
            SoccerBettingError::Unauthorized
        );

        if let Some(new_keeper_authorities) = new_keeper_authorities {
            require!(
                !new_keeper_authorities.is_empty(),
                SoccerBettingError::NoKeeperAuthorities
            );

            require!(
                new_keeper_authorities.len() <= MAX_KEEPER_AUTHORITIES,
                SoccerBettingError::MaxKeeperAuthoritiesReached
            );
        }

        Ok(())
    }
}

pub fn handler(
    ctx: Context<UpdateConfig>,
    new_admin: Option<Pubkey>,
    new_keeper_authorities: Option<Vec<Pubkey>>,
    new_oracle_authority: Option<Pubkey>,
    new_treasury: Option<Pubkey>,
) -> Result<()> {
    // validate
    ctx.accounts.validate(&new_keeper_authorities)?;

    let config = &mut ctx.accounts.config;

    // set fields
    if let Some(new_admin) = new_admin {
        config.admin = new_admin;
    }
    if let Some(new_keeper_authorities) = new_keeper_authorities {
        config.keeper_authorities = new_keeper_authorities;
    }
    if let Some(new_oracle_authority) = new_oracle_authority {
        config.oracle_authority = new_oracle_authority;
    }
    if let Some(new_treasury) = new_treasury {
        config.treasury = new_treasury;
    }

    // update config version
    config.version = config
        .version
        .checked_add(1)
        .ok_or(SoccerBettingError::Overflow)?;

    emit!(ConfigUpdated {
        admin: config.admin,
        version: config.version,
    });

    Ok(())
}
