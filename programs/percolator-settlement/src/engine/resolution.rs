use anchor_lang::prelude::*;

use crate::engine::{lifecycle, ratio};
use crate::errors::SettlementError;
use crate::state::{Market, MarketStatus, Outcome};

/// Resolve `market` to `outcome` and freeze its h-ratio.
///
/// `caller` must be the market's oracle. `vault_balance` is the balance
/// available for payouts right now; it is recorded as the ceiling for all
/// later settlements. Returns the frozen ratio in basis points.
pub fn resolve(
    market: &mut Market,
    caller: &Pubkey,
    outcome: Outcome,
    vault_balance: u64,
    now: i64,
) -> Result<u16> {
    require_keys_eq!(*caller, market.oracle, SettlementError::UnauthorizedOracle);
    lifecycle::check_transition(market, MarketStatus::Resolved, now)?;
    let (winner_pool, loser_pool) = market
        .pools_for(outcome)
        .ok_or(SettlementError::InvalidOutcome)?;

    let h_ratio_bps = ratio::h_ratio_bps(vault_balance, winner_pool, loser_pool)?;

    market.outcome = outcome;
    market.h_ratio_bps = h_ratio_bps;
    market.vault_at_resolution = vault_balance;
    market.resolved_at = now;
    lifecycle::transition(market, MarketStatus::Resolved, now)?;

    Ok(h_ratio_bps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::H_RATIO_UNSET;

    fn market(yes_pool: u64, no_pool: u64) -> Market {
        Market {
            oracle: Pubkey::new_unique(),
            deadline: 1_000,
            yes_pool,
            no_pool,
            h_ratio_bps: H_RATIO_UNSET,
            ..Market::default()
        }
    }

    #[test]
    fn freezes_ratio_and_snapshot() {
        let mut m = market(5_000, 3_000);
        let oracle = m.oracle;

        let h = resolve(&mut m, &oracle, Outcome::Yes, 6_000, 1_200).unwrap();

        assert_eq!(h, 7_500);
        assert_eq!(m.h_ratio(), Some(7_500));
        assert_eq!(m.status, MarketStatus::Resolved);
        assert_eq!(m.outcome, Outcome::Yes);
        assert_eq!(m.vault_at_resolution, 6_000);
        assert_eq!(m.resolved_at, 1_200);
    }

    #[test]
    fn winner_side_selects_pools() {
        // NO wins: winners 3000, losers 5000, vault 4000 → 0.5
        let mut m = market(5_000, 3_000);
        let oracle = m.oracle;
        assert_eq!(resolve(&mut m, &oracle, Outcome::No, 4_000, 0).unwrap(), 5_000);
    }

    #[test]
    fn only_oracle_may_resolve() {
        let mut m = market(1, 1);
        let err = resolve(&mut m, &Pubkey::new_unique(), Outcome::Yes, 2, 0).unwrap_err();

        assert_eq!(err, SettlementError::UnauthorizedOracle.into());
        assert_eq!(m.status, MarketStatus::Open);
        assert_eq!(m.h_ratio(), None);
    }

    #[test]
    fn unresolved_outcome_is_rejected() {
        let mut m = market(1, 1);
        let oracle = m.oracle;
        assert_eq!(
            resolve(&mut m, &oracle, Outcome::Unresolved, 2, 0).unwrap_err(),
            SettlementError::InvalidOutcome.into()
        );
        assert_eq!(m.status, MarketStatus::Open);
    }

    #[test]
    fn second_resolution_keeps_first_result() {
        let mut m = market(5_000, 3_000);
        let oracle = m.oracle;
        resolve(&mut m, &oracle, Outcome::Yes, 8_000, 0).unwrap();

        let err = resolve(&mut m, &oracle, Outcome::No, 1, 10).unwrap_err();

        assert_eq!(err, SettlementError::AlreadyResolved.into());
        assert_eq!(m.outcome, Outcome::Yes);
        assert_eq!(m.h_ratio(), Some(10_000));
        assert_eq!(m.vault_at_resolution, 8_000);
        assert_eq!((m.yes_pool, m.no_pool), (5_000, 3_000));
    }

    #[test]
    fn cancelled_market_cannot_resolve() {
        let mut m = market(1, 1);
        m.status = MarketStatus::Cancelled;
        let oracle = m.oracle;
        assert_eq!(
            resolve(&mut m, &oracle, Outcome::Yes, 2, 0).unwrap_err(),
            SettlementError::InvalidState.into()
        );
    }
}
