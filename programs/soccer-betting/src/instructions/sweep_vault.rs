use crate::{constants::*, error::SoccerBettingError, events::*, state::*};
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{transfer, Mint, Token, TokenAccount, Transfer},
};

#[derive(Accounts)]
pub struct SweepVault<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [MATCH_SEED.as_bytes(), &match_account.match_id.to_le_bytes()],
        bump = match_account.bump
    )]
    pub match_account: Account<'info, Match>,

    #[account(
        mut,
        seeds = [VAULT_SEED.as_bytes(), match_account.key().as_ref()],
        bump = match_account.vault_bump
    )]
    pub vault: Account<'info, TokenAccount>,

    /// CHECK: Treasury pubkey from config
    pub treasury: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = mint,
        associated_token::authority = treasury,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> SweepVault<'info> {
    pub fn validate(&self) -> Result<()> {
        require_keys_eq!(
            self.signer.key(),
            self.config.admin,
            SoccerBettingError::Unauthorized
        );

        require_keys_eq!(
            self.treasury.key(),
            self.config.treasury,
            SoccerBettingError::InvalidTreasury
        );

        require_keys_eq!(
            self.mint.key(),
            self.config.token_mint,
            SoccerBettingError::InvalidMint
        );

        require!(
            self.match_account.state == MatchState::Resolved,
            SoccerBettingError::InvalidStateTransition
        );

        // once every bet is settled, whatever is left is residue
        require!(
            self.match_account.is_settled(),
            SoccerBettingError::SettlementPending
        );

        require!(self.vault.amount > 0, SoccerBettingError::NothingToSweep);

        Ok(())
    }
}

pub fn handler(ctx: Context<SweepVault>) -> Result<()> {
    // validate
    ctx.accounts.validate()?;

    let match_account = &ctx.accounts.match_account;
    let amount = ctx.accounts.vault.amount;
    let match_id = match_account.match_id;

    // transfer residue from vault to treasury
    let transfer_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.treasury_token_account.to_account_info(),
        authority: match_account.to_account_info(),
    };
    let seeds = &[
        MATCH_SEED.as_bytes(),
        &match_id.to_le_bytes(),
        &[match_account.bump],
    ];
    let signer = &[&seeds[..]];
    let transfer_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        transfer_accounts,
        signer,
    );
    transfer(transfer_ctx, amount)?;

    emit!(VaultSwept {
        match_id,
        treasury: ctx.accounts.treasury.key(),
        amount,
    });

    Ok(())
}
