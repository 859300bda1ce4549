#![allow(unexpected_cfgs)]
#![allow(deprecated)]

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;
pub use utils::{BetPage, BetView, UpkeepCheck, UpkeepPayload};

declare_id!("ASqURCYrFiR9SncJFFEF1g8G4M6A3nWV5UMpJ89EZfoA");

#[program]
pub mod soccer_betting {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        keeper_authorities: Vec<Pubkey>,
        oracle_authority: Pubkey,
        token_mint: Pubkey,
        treasury: Pubkey,
    ) -> Result<()> {
        initialize::handler(
            ctx,
            keeper_authorities,
            oracle_authority,
            token_mint,
            treasury,
        )
    }

    pub fn update_config(
        ctx: Context<UpdateConfig>,
        new_admin: Option<Pubkey>,
        new_keeper_authorities: Option<Vec<Pubkey>>,
        new_oracle_authority: Option<Pubkey>,
        new_treasury: Option<Pubkey>,
    ) -> Result<()> {
        update_config::handler(
            ctx,
            new_admin,
            new_keeper_authorities,
            new_oracle_authority,
            new_treasury,
        )
    }

    pub fn set_program_status(ctx: Context<SetProgramStatus>, paused: bool) -> Result<()> {
        set_program_status::handler(ctx, paused)
    }

    pub fn place_bet(
        ctx: Context<PlaceBet>,
        match_id: u64,
        start_time: i64,
        outcome: MatchResult,
        amount: u64,
    ) -> Result<()> {
        place_bet::handler(ctx, match_id, start_time, outcome, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepCheck> {
        check_upkeep::handler(ctx)
    }

    pub fn perform_upkeep<'info>(
        ctx: Context<'_, '_, 'info, 'info, PerformUpkeep<'info>>,
        perform_data: Vec<u8>,
    ) -> Result<()> {
        perform_upkeep::handler(ctx, perform_data)
    }

    pub fn fulfill_result(ctx: Context<FulfillResult>, request_id: u64, outcome: u8) -> Result<()> {
        fulfill_result::handler(ctx, request_id, outcome)
    }

    pub fn sweep_vault(ctx: Context<SweepVault>) -> Result<()> {
        sweep_vault::handler(ctx)
    }

    pub fn get_match_details(
        ctx: Context<GetMatchDetails>,
        match_id: u64,
    ) -> Result<MatchDetails> {
        get_match_details::handler(ctx, match_id)
    }

    pub fn get_user_active_bets(
        ctx: Context<GetUserBets>,
        bettor: Pubkey,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<BetRecord>> {
        get_user_bets::handler(ctx, bettor, offset, limit, BetView::Active)
    }

    pub fn get_user_resolved_bets(
        ctx: Context<GetUserBets>,
        bettor: Pubkey,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<BetRecord>> {
        get_user_bets::handler(ctx, bettor, offset, limit, BetView::Resolved)
    }
}
