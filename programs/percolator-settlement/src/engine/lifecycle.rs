//! Market lifecycle state machine.
//!
//! ```text
//! Open ──deadline──▶ Closed ──resolve──▶ Resolved
//!   │                  │
//!   └──────cancel──────┴──────────────▶ Cancelled
//! ```
//!
//! `Closed` is implicit: a stored `Open` market past its deadline already
//! behaves as closed. `close` only persists that fact.

use anchor_lang::prelude::*;

use crate::errors::SettlementError;
use crate::state::{Market, MarketStatus};

/// Validate the move from the market's current status to `to` at `now`.
pub fn check_transition(market: &Market, to: MarketStatus, now: i64) -> Result<()> {
    let from = market.effective_status(now);
    match (from, to) {
        (MarketStatus::Open, MarketStatus::Closed) => err!(SettlementError::MarketNotYetClosed),
        (MarketStatus::Closed, MarketStatus::Closed) => {
            // Persisting an implicit close is fine; closing twice is not.
            require!(
                market.status == MarketStatus::Open,
                SettlementError::InvalidState
            );
            Ok(())
        }
        (MarketStatus::Open | MarketStatus::Closed, MarketStatus::Resolved) => Ok(()),
        (MarketStatus::Open | MarketStatus::Closed, MarketStatus::Cancelled) => Ok(()),
        (MarketStatus::Resolved, MarketStatus::Resolved) => err!(SettlementError::AlreadyResolved),
        (MarketStatus::Resolved, MarketStatus::Cancelled) => {
            err!(SettlementError::CannotCancelResolved)
        }
        _ => err!(SettlementError::InvalidState),
    }
}

/// Apply a transition after [`check_transition`] succeeds.
pub fn transition(market: &mut Market, to: MarketStatus, now: i64) -> Result<()> {
    check_transition(market, to, now)?;
    market.status = to;
    Ok(())
}

/// Persist `Closed` once the deadline has passed. Anyone may call this.
pub fn close(market: &mut Market, now: i64) -> Result<()> {
    transition(market, MarketStatus::Closed, now)
}

/// Bets are only accepted by an `Open` market before its deadline.
pub fn ensure_accepting_bets(market: &Market, now: i64) -> Result<()> {
    require!(
        market.status == MarketStatus::Open,
        SettlementError::InvalidState
    );
    require!(now < market.deadline, SettlementError::MarketExpired);
    Ok(())
}
