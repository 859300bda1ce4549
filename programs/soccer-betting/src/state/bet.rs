use crate::constants::*;
use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace, Debug)]
pub struct Bet {
    // --- Identify ---
    pub id: u64,               // Position of the bet within its match, starting at 1.
    pub match_account: Pubkey, // The match this bet is associated with.
    pub match_id: u64,         // Fixture id of that match.
    pub bettor: Pubkey,        // The address of the player placing the bet.
    pub bettor_index: u64,     // The bettor's running bet number, orders their history.

    // --- Bet Info ---
    pub amount: u64,         // The stake.
    pub result: MatchResult, // The predicted outcome.
    pub claimed: bool,       // Whether winnings have been paid out. Never reset.
    pub payout: u64,         // The amount paid out, zero for a losing bet.

    // --- Metadata ---
    pub created_at: i64, // The timestamp when the bet was placed.
    pub bump: u8,        // A bump seed for PDA.
}

/// Bet as returned by the bet history views.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct BetRecord {
    pub match_id: u64,
    pub bettor: Pubkey,
    pub amount: u64,
    pub result: MatchResult,
    pub claimed: bool,
    pub payout: u64,
}

impl From<&Bet> for BetRecord {
    fn from(bet: &Bet) -> Self {
        Self {
            match_id: bet.match_id,
            bettor: bet.bettor,
            amount: bet.amount,
            result: bet.result,
            claimed: bet.claimed,
            payout: bet.payout,
        }
    }
}
