use crate::constants::*;
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct Config {
    // --- Authorities ---
    pub admin: Pubkey, // The administrator of the program.
    #[max_len(MAX_KEEPER_AUTHORITIES)]
    pub keeper_authorities: Vec<Pubkey>, // Keepers allowed to perform upkeep.
    pub oracle_authority: Pubkey, // The only signer allowed to deliver results.

    // --- Token & Treasury ---
    pub token_mint: Pubkey, // The token staked on matches.
    pub treasury: Pubkey,   // Receives residue swept from resolved vaults.

    // --- Global State ---
    pub status: ProgramStatus, // Overall program status (Active / Paused).
    pub request_counter: u64,  // Last issued oracle request id.

    // --- Metadata ---
    pub version: u8, // Bumped on every config update.
    pub bump: u8,    // A bump seed for PDA.
}
