pub mod bet;
pub mod payout;
pub mod time;
pub mod upkeep;
pub mod wager;

pub use bet::*;
pub use payout::*;
pub use time::*;
pub use upkeep::*;
pub use wager::*;
