use anchor_lang::prelude::*;

use crate::errors::SettlementError;
use crate::state::H_RATIO_FULL;

/// Basis-point denominator.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Compute the h-ratio in basis points.
///
/// ```text
/// total_claims = winner_pool + loser_pool
/// h            = min(vault_balance, total_claims) / total_claims
/// h_bps        = round_half_up(h × 10000)
/// ```
///
/// With no claims at all the ratio is full. The result never exceeds
/// 10000, and is exactly 10000 whenever the vault covers `total_claims`.
pub fn h_ratio_bps(vault_balance: u64, winner_pool: u64, loser_pool: u64) -> Result<u16> {
    let total_claims = (winner_pool as u128) + (loser_pool as u128);
    if total_claims == 0 {
        return Ok(H_RATIO_FULL);
    }

    let covered = (vault_balance as u128).min(total_claims);
    let scaled = covered
        .checked_mul(BPS_DENOMINATOR)
        .and_then(|s| s.checked_add(total_claims / 2))
        .ok_or(SettlementError::ArithmeticOverflow)?;

    u16::try_from(scaled / total_claims).map_err(|_| error!(SettlementError::ArithmeticOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_covered_vault_is_full_ratio() {
        // vault 8000, winners 5000, losers 3000
        assert_eq!(h_ratio_bps(8_000, 5_000, 3_000).unwrap(), 10_000);
        assert_eq!(h_ratio_bps(u64::MAX, 5_000, 3_000).unwrap(), 10_000);
    }

    #[test]
    fn short_vault_scales_down() {
        assert_eq!(h_ratio_bps(6_000, 5_000, 3_000).unwrap(), 7_500);
        assert_eq!(h_ratio_bps(0, 5_000, 3_000).unwrap(), 0);
    }

    #[test]
    fn no_claims_is_full_ratio() {
        assert_eq!(h_ratio_bps(0, 0, 0).unwrap(), 10_000);
        assert_eq!(h_ratio_bps(123, 0, 0).unwrap(), 10_000);
    }

    #[test]
    fn rounds_to_nearest() {
        // 1/3 = 3333.33.. → 3333
        assert_eq!(h_ratio_bps(1, 2, 1).unwrap(), 3_333);
        // 2/3 = 6666.66.. → 6667
        assert_eq!(h_ratio_bps(2, 2, 1).unwrap(), 6_667);
        // 1/20000 = 0.5 bps → rounds half up to 1
        assert_eq!(h_ratio_bps(1, 10_000, 10_000).unwrap(), 1);
    }

    #[test]
    fn extreme_pools_do_not_overflow() {
        assert_eq!(h_ratio_bps(u64::MAX, u64::MAX, u64::MAX).unwrap(), 5_000);
        assert_eq!(h_ratio_bps(u64::MAX - 1, u64::MAX, 0).unwrap(), 10_000);
    }

    #[test]
    fn always_within_bounds() {
        let mut seed = 0x9e37_79b9_7f4a_7c15_u64;
        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let vault = seed % 1_000_000;
            let winners = (seed >> 20) % 1_000_000;
            let losers = (seed >> 40) % 1_000_000;
            let h = h_ratio_bps(vault, winners, losers).unwrap();
            assert!(h <= 10_000);
            if vault >= winners + losers {
                assert_eq!(h, 10_000);
            }
        }
    }
}
