//! Settlement core.
//!
//! Pure state transitions over [`Market`](crate::state::Market),
//! [`UserPosition`](crate::state::UserPosition) and
//! [`GlobalConfig`](crate::state::GlobalConfig). Nothing in here touches
//! sysvars, signers or CPI: the caller passes the current time and the
//! identity it has already authenticated, and moves value through a
//! [`Vault`].
//!
//! Every operation checks all of its preconditions before mutating anything,
//! so a returned error always means "nothing changed".

pub mod book;
pub mod ledger;
pub mod lifecycle;
pub mod ratio;
pub mod refund;
pub mod resolution;
pub mod settlement;
pub mod vault;

pub use ratio::h_ratio_bps;
pub use settlement::{compute_payout, Payout};
pub use vault::{MemoryVault, Vault};
