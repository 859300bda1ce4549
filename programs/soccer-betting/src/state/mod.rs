pub mod bet;
pub mod bettor;
pub mod config;
pub mod oracle_request;
pub mod soccer_match;

pub use bet::*;
pub use bettor::*;
pub use config::*;
pub use oracle_request::*;
pub use soccer_match::*;
