use crate::{constants::*, error::SoccerBettingError, events::*, state::*, utils::*};
use anchor_lang::prelude::*;
use anchor_spl::token::{transfer, Mint, Token, TokenAccount, Transfer};

#[derive(Accounts)]
#[instruction(match_id: u64)]
pub struct PlaceBet<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED.as_bytes()],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + Match::INIT_SPACE,
        seeds = [MATCH_SEED.as_bytes(), &match_id.to_le_bytes()],
        bump
    )]
    pub match_account: Account<'info, Match>,

    #[account(
        init_if_needed,
        payer = signer,
        token::mint = mint,
        token::authority = match_account,
        seeds = [VAULT_SEED.as_bytes(), match_account.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + Bettor::INIT_SPACE,
        seeds = [BETTOR_SEED.as_bytes(), signer.key().as_ref()],
        bump
    )]
    pub bettor_account: Account<'info, Bettor>,

    #[account(
        init,
        payer = signer,
        space = DISCRIMINATOR_SIZE as usize + Bet::INIT_SPACE,
        seeds = [BET_SEED.as_bytes(), match_account.key().as_ref(), &(match_account.total_bets + 1).to_le_bytes()],
        bump
    )]
    pub bet: Account<'info, Bet>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = signer
    )]
    pub token_account: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> PlaceBet<'info> {
    pub fn validate(&self, amount: u64) -> Result<()> {
        require!(
            self.config.status == ProgramStatus::Active,
            SoccerBettingError::ProgramPaused
        );

        require_keys_eq!(
            self.mint.key(),
            self.config.token_mint,
            SoccerBettingError::InvalidMint
        );

        validate_wager_amount(amount)?;

        Ok(())
    }
}

pub fn handler(
    ctx: Context<PlaceBet>,
    match_id: u64,
    start_time: i64,
    outcome: MatchResult,
    amount: u64,
) -> Result<()> {
    // validate
    ctx.accounts.validate(amount)?;

    let now = Clock::get()?.unix_timestamp;
    let signer_key = ctx.accounts.signer.key();
    let vault_key = ctx.accounts.vault.key();
    let match_account = &mut ctx.accounts.match_account;

    // open the match on its first bet
    let created = match_account.open(
        match_id,
        start_time,
        now,
        vault_key,
        ctx.bumps.vault,
        ctx.bumps.match_account,
    );
    if created {
        emit!(MatchCreated {
            match_id,
            start_time,
        });
    } else if match_account.start_time != start_time {
        msg!(
            "Match {} keeps start time {}, ignoring {}",
            match_id,
            match_account.start_time,
            start_time
        );
    }

    match_account.ensure_accepting_bets(now)?;

    // set match fields
    let bet_id = match_account.record_wager(outcome, amount)?;
    let match_key = match_account.key();

    // set bettor fields
    let bettor_account = &mut ctx.accounts.bettor_account;
    if bettor_account.total_bets == 0 {
        bettor_account.bettor = signer_key;
        bettor_account.bump = ctx.bumps.bettor_account;
    }
    bettor_account.total_bets = bettor_account
        .total_bets
        .checked_add(1)
        .ok_or(SoccerBettingError::Overflow)?;
    bettor_account.total_wagered = bettor_account
        .total_wagered
        .checked_add(amount)
        .ok_or(SoccerBettingError::Overflow)?;

    // set bet fields
    let bet = &mut ctx.accounts.bet;
    bet.id = bet_id;
    bet.match_account = match_key;
    bet.match_id = match_id;
    bet.bettor = signer_key;
    bet.bettor_index = bettor_account.total_bets;
    bet.amount = amount;
    bet.result = outcome;
    bet.claimed = false;
    bet.payout = 0;
    bet.created_at = now;
    bet.bump = ctx.bumps.bet;

    // transfer from signer to vault
    let transfer_accounts = Transfer {
        from: ctx.accounts.token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        authority: ctx.accounts.signer.to_account_info(),
    };
    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        transfer_accounts,
    );
    transfer(transfer_ctx, amount)?;

    emit!(BetPlaced {
        match_id,
        bettor: signer_key,
        outcome,
        amount,
    });

    Ok(())
}
