use anchor_lang::prelude::*;

use crate::engine::lifecycle;
use crate::engine::vault::Vault;
use crate::errors::SettlementError;
use crate::state::*;

/// Cancel an unresolved market. Creator or oracle only.
pub fn cancel(market: &mut Market, caller: &Pubkey, now: i64) -> Result<()> {
    require!(
        *caller == market.creator || *caller == market.oracle,
        SettlementError::UnauthorizedCreator
    );
    lifecycle::transition(market, MarketStatus::Cancelled, now)
}

/// Return the owner's full stake from a cancelled market.
///
/// No ratio, no profit: exactly `position.deposited` leaves the vault.
pub fn claim_refund<V: Vault>(
    market: &mut Market,
    market_key: &Pubkey,
    position: &mut UserPosition,
    owner: &Pubkey,
    vault: &mut V,
) -> Result<u64> {
    require!(
        market.status == MarketStatus::Cancelled,
        SettlementError::InvalidState
    );
    require_keys_eq!(
        position.market,
        *market_key,
        SettlementError::PositionMarketMismatch
    );
    require_keys_eq!(position.user, *owner, SettlementError::UnauthorizedOwner);
    match position.status {
        PositionStatus::Active => {}
        PositionStatus::Settled => return err!(SettlementError::AlreadySettled),
        PositionStatus::Refunded => return err!(SettlementError::AlreadyRefunded),
    }
    require!(position.is_open(), SettlementError::NoPosition);

    let amount = position.deposited;
    let refunded_amount = market
        .refunded_amount
        .checked_add(amount)
        .ok_or(SettlementError::ArithmeticOverflow)?;
    let refunds_count = market
        .refunds_count
        .checked_add(1)
        .ok_or(SettlementError::ArithmeticOverflow)?;

    vault.disburse(owner, amount)?;

    position.status = PositionStatus::Refunded;
    position.payout = amount;
    market.refunded_amount = refunded_amount;
    market.refunds_count = refunds_count;

    Ok(amount)
}
