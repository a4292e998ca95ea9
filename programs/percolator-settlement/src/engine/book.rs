//! In-memory host for the engine.
//!
//! Mirrors the program's account model without a runtime: markets keyed by
//! their PDA, positions keyed by `(market, user)`, one [`MemoryVault`] per
//! market. Used for off-chain simulation and the scenario tests.

use std::collections::{BTreeMap, HashMap};

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use crate::engine::settlement::Payout;
use crate::engine::vault::{MemoryVault, Vault};
use crate::engine::{ledger, lifecycle, refund, resolution, settlement};
use crate::errors::SettlementError;
use crate::state::*;

#[derive(Debug, Default)]
pub struct MarketBook {
    config: GlobalConfig,
    markets: BTreeMap<Pubkey, Market>,
    positions: HashMap<(Pubkey, Pubkey), UserPosition>,
    vaults: HashMap<Pubkey, MemoryVault>,
}

impl MarketBook {
    pub fn new(authority: Pubkey, params: ConfigParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            config: GlobalConfig {
                authority,
                max_position_amount: params.max_position_amount,
                min_market_duration: params.min_market_duration,
                ..GlobalConfig::default()
            },
            ..Self::default()
        })
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn market(&self, market: &Pubkey) -> Option<&Market> {
        self.markets.get(market)
    }

    pub fn position(&self, market: &Pubkey, user: &Pubkey) -> Option<&UserPosition> {
        self.positions.get(&(*market, *user))
    }

    pub fn vault(&self, market: &Pubkey) -> Option<&MemoryVault> {
        self.vaults.get(market)
    }

    pub fn vault_mut(&mut self, market: &Pubkey) -> Option<&mut MemoryVault> {
        self.vaults.get_mut(market)
    }

    /// Users holding a position in `market`.
    pub fn positions_of(&self, market: &Pubkey) -> Vec<Pubkey> {
        let mut users: Vec<Pubkey> = self
            .positions
            .keys()
            .filter(|(m, _)| m == market)
            .map(|(_, user)| *user)
            .collect();
        users.sort();
        users
    }

    pub fn create_market(
        &mut self,
        creator: Pubkey,
        terms: MarketTerms,
        seed_amount: u64,
        now: i64,
    ) -> Result<Pubkey> {
        let mut market = ledger::open_market(&mut self.config, creator, terms, now)?;
        let (key, bump) = Market::address(&creator, market.market_id);
        let (vault, vault_bump) = Market::vault_address(&key);
        market.vault = vault;
        market.vault_bump = vault_bump;
        market.bump = bump;

        self.vaults.insert(key, MemoryVault::with_balance(seed_amount));
        self.markets.insert(key, market);
        Ok(key)
    }

    pub fn place_bet(
        &mut self,
        market_key: &Pubkey,
        bettor: Pubkey,
        side: BetSide,
        amount: u64,
        now: i64,
    ) -> Result<()> {
        let (market, vault) = Self::split(&mut self.markets, &mut self.vaults, market_key)?;
        let slot = (*market_key, bettor);
        let mut position = self.positions.get(&slot).cloned().unwrap_or_default();

        ledger::place_bet(
            market,
            market_key,
            &mut position,
            &bettor,
            side,
            amount,
            now,
            vault,
        )?;

        self.positions.insert(slot, position);
        Ok(())
    }

    pub fn close_market(&mut self, market_key: &Pubkey, now: i64) -> Result<()> {
        let market = self
            .markets
            .get_mut(market_key)
            .ok_or(ErrorCode::AccountNotInitialized)?;
        lifecycle::close(market, now)
    }

    pub fn resolve(
        &mut self,
        market_key: &Pubkey,
        caller: &Pubkey,
        outcome: Outcome,
        now: i64,
    ) -> Result<u16> {
        let (market, vault) = Self::split(&mut self.markets, &mut self.vaults, market_key)?;
        let balance = vault.balance();
        resolution::resolve(market, caller, outcome, balance, now)
    }

    /// Settle `owner`'s position. Anyone may trigger this; funds go to `owner`.
    pub fn settle(&mut self, market_key: &Pubkey, owner: &Pubkey) -> Result<Payout> {
        let (market, vault) = Self::split(&mut self.markets, &mut self.vaults, market_key)?;
        let position = self
            .positions
            .get_mut(&(*market_key, *owner))
            .ok_or(SettlementError::NoPosition)?;
        settlement::settle(market, market_key, position, vault)
    }

    pub fn cancel(&mut self, market_key: &Pubkey, caller: &Pubkey, now: i64) -> Result<()> {
        let market = self
            .markets
            .get_mut(market_key)
            .ok_or(ErrorCode::AccountNotInitialized)?;
        refund::cancel(market, caller, now)
    }

    pub fn claim_refund(&mut self, market_key: &Pubkey, owner: &Pubkey) -> Result<u64> {
        let (market, vault) = Self::split(&mut self.markets, &mut self.vaults, market_key)?;
        let position = self
            .positions
            .get_mut(&(*market_key, *owner))
            .ok_or(SettlementError::NoPosition)?;
        refund::claim_refund(market, market_key, position, owner, vault)
    }

    fn split<'a>(
        markets: &'a mut BTreeMap<Pubkey, Market>,
        vaults: &'a mut HashMap<Pubkey, MemoryVault>,
        key: &Pubkey,
    ) -> Result<(&'a mut Market, &'a mut MemoryVault)> {
        let market = markets
            .get_mut(key)
            .ok_or(ErrorCode::AccountNotInitialized)?;
        let vault = vaults.get_mut(key).ok_or(ErrorCode::AccountNotInitialized)?;
        Ok((market, vault))
    }
}
