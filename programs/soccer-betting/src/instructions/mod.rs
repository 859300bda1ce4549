#![allow(ambiguous_glob_reexports)]

pub mod check_upkeep;
pub mod fulfill_result;
pub mod get_match_details;
pub mod get_user_bets;
pub mod initialize;
pub mod perform_upkeep;
pub mod place_bet;
pub mod set_program_status;
pub mod sweep_vault;
pub mod update_config;

pub use check_upkeep::*;
pub use fulfill_result::*;
pub use get_match_details::*;
pub use get_user_bets::*;
pub use initialize::*;
pub use perform_upkeep::*;
pub use place_bet::*;
pub use set_program_status::*;
pub use sweep_vault::*;
pub use update_config::*;
