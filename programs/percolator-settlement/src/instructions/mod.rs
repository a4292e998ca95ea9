pub mod initialize_config;
pub mod update_config;
pub mod create_market;
pub mod place_bet;
pub mod close_market;
pub mod resolve;
pub mod settle;
pub mod cancel;
pub mod claim_refund;

pub use initialize_config::*;
pub use update_config::*;
pub use create_market::*;
pub use place_bet::*;
pub use close_market::*;
pub use resolve::*;
pub use settle::*;
pub use cancel::*;
pub use claim_refund::*;
