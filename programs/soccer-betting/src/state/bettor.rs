use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct Bettor {
    pub bettor: Pubkey,
    pub total_bets: u64,
    pub total_wagered: u64,
    pub bump: u8,
}
