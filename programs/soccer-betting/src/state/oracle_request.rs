use crate::constants::*;
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct OracleRequest {
    // --- Identity ---
    pub request_id: u64,
    pub match_account: Pubkey,
    pub match_id: u64,

    // --- State ---
    pub fulfilled: bool,
    pub result: Option<MatchResult>,

    // --- Metadata ---
    pub requested_at: i64,
    pub fulfilled_at: Option<i64>,
    pub bump: u8,
}
