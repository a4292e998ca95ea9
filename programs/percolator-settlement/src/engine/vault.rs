use std::collections::HashMap;

use anchor_lang::prelude::*;

use crate::errors::SettlementError;

/// Value store backing one market.
///
/// `deposit` is driven by betting; `disburse` by settlement and refunds.
/// `disburse` must fail without side effects when `amount` exceeds
/// [`Vault::balance`].
pub trait Vault {
    /// Lamports available for payouts.
    fn balance(&self) -> u64;

    /// Move `amount` from `from` into the vault.
    fn deposit(&mut self, from: &Pubkey, amount: u64) -> Result<()>;

    /// Move `amount` from the vault to `to`.
    fn disburse(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// In-memory vault with per-account bookkeeping.
#[derive(Debug, Default, Clone)]
pub struct MemoryVault {
    balance: u64,
    deposited: HashMap<Pubkey, u64>,
    disbursed: HashMap<Pubkey, u64>,
}

impl MemoryVault {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }

    /// Total received by `account` through `disburse`.
    pub fn paid_to(&self, account: &Pubkey) -> u64 {
        self.disbursed.get(account).copied().unwrap_or(0)
    }

    /// Total sent by `account` through `deposit`.
    pub fn deposited_by(&self, account: &Pubkey) -> u64 {
        self.deposited.get(account).copied().unwrap_or(0)
    }

    /// Sum of every disbursement.
    pub fn total_disbursed(&self) -> u64 {
        self.disbursed.values().sum()
    }

    /// Remove funds outside of settlement, e.g. a loss absorbed by a shared
    /// risk pool.
    pub fn drain(&mut self, amount: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(SettlementError::InsufficientVaultBalance)?;
        Ok(())
    }

    /// Add funds outside of betting, e.g. a creator seed.
    pub fn fund(&mut self, amount: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(SettlementError::ArithmeticOverflow)?;
        Ok(())
    }
}

impl Vault for MemoryVault {
    fn balance(&self) -> u64 {
        self.balance
    }

    fn deposit(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(SettlementError::ArithmeticOverflow)?;
        let entry = self.deposited.entry(*from).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(SettlementError::ArithmeticOverflow)?;
        self.balance = balance;
        Ok(())
    }

    fn disburse(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require!(
            amount <= self.balance,
            SettlementError::InsufficientVaultBalance
        );
        let paid = self.paid_to(to);
        let paid = paid
            .checked_add(amount)
            .ok_or(SettlementError::ArithmeticOverflow)?;
        self.balance -= amount;
        self.disbursed.insert(*to, paid);
        Ok(())
    }
}
