//! Market creation, pool accumulation and the position ledger.

use anchor_lang::prelude::*;

use crate::engine::lifecycle;
use crate::engine::vault::Vault;
use crate::errors::SettlementError;
use crate::state::*;

/// Validate `terms` against `config` and build the new market.
///
/// Consumes the config's next market id and bumps its counters. Addressing
/// (mints, vault, bumps) is left at defaults for the caller to fill in.
pub fn open_market(
    config: &mut GlobalConfig,
    creator: Pubkey,
    terms: MarketTerms,
    now: i64,
) -> Result<Market> {
    require!(
        terms.question.chars().count() <= MAX_QUESTION_CHARS,
        SettlementError::QuestionTooLong
    );
    require!(terms.deadline > now, SettlementError::DeadlineInPast);
    let min_deadline = now
        .checked_add(config.min_market_duration)
        .ok_or(SettlementError::ArithmeticOverflow)?;
    require!(
        terms.deadline >= min_deadline,
        SettlementError::MarketDurationTooShort
    );

    let market_id = config.next_market_id;
    let next_market_id = market_id
        .checked_add(1)
        .ok_or(SettlementError::ArithmeticOverflow)?;
    let total_markets = config
        .total_markets
        .checked_add(1)
        .ok_or(SettlementError::ArithmeticOverflow)?;

    config.next_market_id = next_market_id;
    config.total_markets = total_markets;

    Ok(Market {
        market_id,
        creator,
        oracle: terms.oracle,
        question: terms.question,
        rule: terms.rule,
        target_value: terms.target_value,
        token_mint: terms.token_mint,
        created_at: now,
        deadline: terms.deadline,
        max_position_amount: config.max_position_amount,
        status: MarketStatus::Open,
        outcome: Outcome::Unresolved,
        h_ratio_bps: H_RATIO_UNSET,
        ..Market::default()
    })
}

/// Add `amount` on `side` for `bettor`.
///
/// Creates the position on first bet. Later bets must repeat the side the
/// position was opened with. The stake is pulled through `vault` before any
/// ledger field changes.
#[allow(clippy::too_many_arguments)]
pub fn place_bet<V: Vault>(
    market: &mut Market,
    market_key: &Pubkey,
    position: &mut UserPosition,
    bettor: &Pubkey,
    side: BetSide,
    amount: u64,
    now: i64,
    vault: &mut V,
) -> Result<()> {
    require!(amount > 0, SettlementError::ZeroBetAmount);
    lifecycle::ensure_accepting_bets(market, now)?;

    let is_new = !position.is_open();
    if !is_new {
        require_keys_eq!(
            position.market,
            *market_key,
            SettlementError::PositionMarketMismatch
        );
        require_keys_eq!(position.user, *bettor, SettlementError::UnauthorizedOwner);
        require!(position.side == side, SettlementError::SideMismatch);
    }

    let deposited = position
        .deposited
        .checked_add(amount)
        .ok_or(SettlementError::ArithmeticOverflow)?;
    if market.max_position_amount > 0 {
        require!(
            deposited <= market.max_position_amount,
            SettlementError::BetAmountExceedsMax
        );
    }
    let pool = market
        .pool(side)
        .checked_add(amount)
        .ok_or(SettlementError::ArithmeticOverflow)?;
    let positions_count = if is_new {
        market
            .positions_count
            .checked_add(1)
            .ok_or(SettlementError::ArithmeticOverflow)?
    } else {
        market.positions_count
    };

    vault.deposit(bettor, amount)?;

    match side {
        BetSide::Yes => market.yes_pool = pool,
        BetSide::No => market.no_pool = pool,
    }
    market.positions_count = positions_count;

    if is_new {
        position.market = *market_key;
        position.user = *bettor;
        position.side = side;
        position.status = PositionStatus::Active;
    }
    position.deposited = deposited;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::vault::MemoryVault;

    fn config() -> GlobalConfig {
        GlobalConfig {
            next_market_id: 7,
            min_market_duration: 60,
            ..GlobalConfig::default()
        }
    }

    fn terms(deadline: i64) -> MarketTerms {
        MarketTerms {
            question: "Will BONK flip $1B market cap?".to_string(),
            rule: MarketRule::MarketCapTarget,
            target_value: 1_000_000_000_000_000,
            token_mint: Pubkey::new_unique(),
            oracle: Pubkey::new_unique(),
            deadline,
        }
    }

    fn open() -> (Market, Pubkey) {
        let mut cfg = config();
        let market = open_market(&mut cfg, Pubkey::new_unique(), terms(1_000), 0).unwrap();
        (market, Pubkey::new_unique())
    }

    #[test]
    fn open_market_assigns_id_and_unset_ratio() {
        let mut cfg = config();
        let creator = Pubkey::new_unique();
        let market = open_market(&mut cfg, creator, terms(1_000), 100).unwrap();

        assert_eq!(market.market_id, 7);
        assert_eq!(market.creator, creator);
        assert_eq!(market.status, MarketStatus::Open);
        assert_eq!(market.outcome, Outcome::Unresolved);
        assert_eq!(market.h_ratio(), None);
        assert_eq!(market.created_at, 100);
        assert_eq!(cfg.next_market_id, 8);
        assert_eq!(cfg.total_markets, 1);
    }

    #[test]
    fn open_market_validates_terms() {
        let mut cfg = config();
        let creator = Pubkey::new_unique();

        let mut long = terms(1_000);
        long.question = "é".repeat(256);
        assert_eq!(
            open_market(&mut cfg, creator, long, 0).unwrap_err(),
            SettlementError::QuestionTooLong.into()
        );

        // 255 multi-byte characters are still within the limit.
        let mut wide = terms(1_000);
        wide.question = "é".repeat(255);
        assert!(open_market(&mut cfg, creator, wide, 0).is_ok());

        assert_eq!(
            open_market(&mut cfg, creator, terms(100), 100).unwrap_err(),
            SettlementError::DeadlineInPast.into()
        );
        assert_eq!(
            open_market(&mut cfg, creator, terms(150), 100).unwrap_err(),
            SettlementError::MarketDurationTooShort.into()
        );
        // Only the one successful creation consumed an id.
        assert_eq!(cfg.next_market_id, 8);
    }

    #[test]
    fn bets_accumulate_into_pool_and_position() {
        let (mut market, key) = open();
        let bettor = Pubkey::new_unique();
        let mut position = UserPosition::default();
        let mut vault = MemoryVault::default();

        place_bet(&mut market, &key, &mut position, &bettor, BetSide::No, 300, 10, &mut vault).unwrap();
        place_bet(&mut market, &key, &mut position, &bettor, BetSide::No, 200, 20, &mut vault).unwrap();

        assert_eq!(market.no_pool, 500);
        assert_eq!(market.yes_pool, 0);
        assert_eq!(market.positions_count, 1);
        assert_eq!(position.deposited, 500);
        assert_eq!(position.side, BetSide::No);
        assert_eq!(position.user, bettor);
        assert_eq!(position.market, key);
        assert_eq!(vault.balance(), 500);
        assert_eq!(vault.deposited_by(&bettor), 500);
    }

    #[test]
    fn zero_bet_leaves_everything_untouched() {
        let (mut market, key) = open();
        let bettor = Pubkey::new_unique();
        let mut position = UserPosition::default();
        let mut vault = MemoryVault::default();

        let err = place_bet(&mut market, &key, &mut position, &bettor, BetSide::Yes, 0, 10, &mut vault)
            .unwrap_err();

        assert_eq!(err, SettlementError::ZeroBetAmount.into());
        assert_eq!(market.yes_pool, 0);
        assert_eq!(market.positions_count, 0);
        assert!(!position.is_open());
        assert_eq!(vault.balance(), 0);
    }

    #[test]
    fn side_is_fixed_by_first_bet() {
        let (mut market, key) = open();
        let bettor = Pubkey::new_unique();
        let mut position = UserPosition::default();
        let mut vault = MemoryVault::default();

        place_bet(&mut market, &key, &mut position, &bettor, BetSide::Yes, 100, 10, &mut vault).unwrap();
        let err = place_bet(&mut market, &key, &mut position, &bettor, BetSide::No, 100, 10, &mut vault)
            .unwrap_err();

        assert_eq!(err, SettlementError::SideMismatch.into());
        assert_eq!(market.no_pool, 0);
        assert_eq!(position.deposited, 100);
        assert_eq!(vault.balance(), 100);
    }

    #[test]
    fn rejects_bets_after_deadline() {
        let (mut market, key) = open();
        let mut position = UserPosition::default();
        let mut vault = MemoryVault::default();

        let err = place_bet(
            &mut market,
            &key,
            &mut position,
            &Pubkey::new_unique(),
            BetSide::Yes,
            100,
            1_000,
            &mut vault,
        )
        .unwrap_err();
        assert_eq!(err, SettlementError::MarketExpired.into());
    }

    #[test]
    fn enforces_position_cap() {
        let mut cfg = GlobalConfig {
            max_position_amount: 1_000,
            ..config()
        };
        let mut market = open_market(&mut cfg, Pubkey::new_unique(), terms(1_000), 0).unwrap();
        let key = Pubkey::new_unique();
        let bettor = Pubkey::new_unique();
        let mut position = UserPosition::default();
        let mut vault = MemoryVault::default();

        place_bet(&mut market, &key, &mut position, &bettor, BetSide::Yes, 1_000, 1, &mut vault).unwrap();
        let err = place_bet(&mut market, &key, &mut position, &bettor, BetSide::Yes, 1, 1, &mut vault)
            .unwrap_err();
        assert_eq!(err, SettlementError::BetAmountExceedsMax.into());
        assert_eq!(market.yes_pool, 1_000);
    }

    #[test]
    fn pool_overflow_is_rejected() {
        let (mut market, key) = open();
        market.yes_pool = u64::MAX;
        let mut position = UserPosition::default();
        let mut vault = MemoryVault::default();

        let err = place_bet(
            &mut market,
            &key,
            &mut position,
            &Pubkey::new_unique(),
            BetSide::Yes,
            1,
            1,
            &mut vault,
        )
        .unwrap_err();
        assert_eq!(err, SettlementError::ArithmeticOverflow.into());
        assert_eq!(vault.balance(), 0);
    }
}
