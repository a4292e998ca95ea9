//! Two-claim settlement.
//!
//! A winning payout has two parts:
//!
//! 1. **Capital** (senior): the stake itself, always paid in full.
//! 2. **Profit** (junior): the stake's pro-rata share of the losing pool,
//!    scaled by the frozen h-ratio.
//!
//! ```text
//! profit_share   = ⌊capital × loser_pool / winner_pool⌋
//! profit_after_h = ⌊profit_share × h_bps / 10000⌋
//! payout         = capital + min(profit_after_h, profit_budget)
//! ```
//!
//! Both divisions round down, so accumulated rounding can only leave dust in
//! the vault, never overdraw it.
//!
//! The vault snapshot taken at resolution backs every claim. Stakes of winners
//! that have not settled yet are held back from it first:
//!
//! ```text
//! profit_budget = vault_at_resolution − settled_amount − unsettled winner stakes
//! ```
//!
//! so as long as the snapshot covers the winning pool, every winner gets at
//! least the stake back whatever the settlement order. Only when it falls
//! short of the stakes themselves are late claims refused.

use anchor_lang::prelude::*;

use crate::engine::ratio::BPS_DENOMINATOR;
use crate::engine::vault::Vault;
use crate::errors::SettlementError;
use crate::state::*;

/// Breakdown of a single position's payout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Payout {
    pub capital: u64,
    pub profit_share: u64,
    pub profit_after_h: u64,
    /// Profit actually paid; below `profit_after_h` only when the vault
    /// snapshot cannot fund it after holding back unsettled stakes.
    pub profit_paid: u64,
    pub total: u64,
}

impl Payout {
    /// Losing positions receive nothing.
    pub const LOSS: Payout = Payout {
        capital: 0,
        profit_share: 0,
        profit_after_h: 0,
        profit_paid: 0,
        total: 0,
    };
}

/// Payout for a winning stake of `capital`.
pub fn compute_payout(
    capital: u64,
    winner_pool: u64,
    loser_pool: u64,
    h_ratio_bps: u16,
) -> Result<Payout> {
    require!(winner_pool > 0, SettlementError::DivisionByZeroGuard);
    require!(h_ratio_bps <= H_RATIO_FULL, SettlementError::InvalidState);

    let profit_share = (capital as u128)
        .checked_mul(loser_pool as u128)
        .ok_or(SettlementError::ArithmeticOverflow)?
        / winner_pool as u128;
    let profit_after_h = profit_share
        .checked_mul(h_ratio_bps as u128)
        .ok_or(SettlementError::ArithmeticOverflow)?
        / BPS_DENOMINATOR;

    let profit_share =
        u64::try_from(profit_share).map_err(|_| error!(SettlementError::ArithmeticOverflow))?;
    let profit_after_h =
        u64::try_from(profit_after_h).map_err(|_| error!(SettlementError::ArithmeticOverflow))?;
    let total = capital
        .checked_add(profit_after_h)
        .ok_or(SettlementError::ArithmeticOverflow)?;

    Ok(Payout {
        capital,
        profit_share,
        profit_after_h,
        profit_paid: profit_after_h,
        total,
    })
}

/// Settle `position` against its resolved market.
///
/// Losers are marked settled with a zero payout. Winners are paid through
/// `vault` to the position owner, never to whoever submitted the call.
/// Cumulative settlement payouts are capped at the vault balance observed at
/// resolution, with the stakes of unsettled winners reserved ahead of profit.
pub fn settle<V: Vault>(
    market: &mut Market,
    market_key: &Pubkey,
    position: &mut UserPosition,
    vault: &mut V,
) -> Result<Payout> {
    require!(
        market.status == MarketStatus::Resolved,
        SettlementError::InvalidState
    );
    require_keys_eq!(
        position.market,
        *market_key,
        SettlementError::PositionMarketMismatch
    );
    match position.status {
        PositionStatus::Active => {}
        PositionStatus::Settled => return err!(SettlementError::AlreadySettled),
        PositionStatus::Refunded => return err!(SettlementError::AlreadyRefunded),
    }
    require!(position.is_open(), SettlementError::NoPosition);

    let settlements_count = market
        .settlements_count
        .checked_add(1)
        .ok_or(SettlementError::ArithmeticOverflow)?;

    if !position.side.wins(market.outcome) {
        position.status = PositionStatus::Settled;
        position.payout = 0;
        market.settlements_count = settlements_count;
        return Ok(Payout::LOSS);
    }

    let (winner_pool, loser_pool) = market
        .pools_for(market.outcome)
        .ok_or(SettlementError::InvalidState)?;
    let h_ratio_bps = market.h_ratio().ok_or(SettlementError::InvalidState)?;
    let mut payout = compute_payout(position.deposited, winner_pool, loser_pool, h_ratio_bps)?;

    let unsettled_capital = winner_pool
        .checked_sub(market.settled_winner_capital)
        .ok_or(SettlementError::InvalidState)?;
    let available = market
        .vault_at_resolution
        .saturating_sub(market.settled_amount);
    require!(
        payout.capital <= available,
        SettlementError::VaultInsolvency
    );
    let profit_budget = available.saturating_sub(unsettled_capital);
    payout.profit_paid = payout.profit_after_h.min(profit_budget);
    payout.total = payout
        .capital
        .checked_add(payout.profit_paid)
        .ok_or(SettlementError::ArithmeticOverflow)?;

    let settled_amount = market
        .settled_amount
        .checked_add(payout.total)
        .ok_or(SettlementError::ArithmeticOverflow)?;
    let settled_winner_capital = market
        .settled_winner_capital
        .checked_add(payout.capital)
        .ok_or(SettlementError::ArithmeticOverflow)?;

    vault.disburse(&position.user, payout.total)?;

    position.status = PositionStatus::Settled;
    position.payout = payout.total;
    market.settled_amount = settled_amount;
    market.settled_winner_capital = settled_winner_capital;
    market.settlements_count = settlements_count;

    Ok(payout)
}
