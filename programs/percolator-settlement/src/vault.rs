use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::engine::Vault;
use crate::errors::SettlementError;

/// Lamports in `vault` above its rent-exempt reserve.
///
/// The reserve keeps the PDA alive and is never paid out.
pub fn available_lamports(vault: &AccountInfo) -> Result<u64> {
    Ok(spendable(vault.lamports(), &Rent::get()?))
}

/// `lamports` minus the rent-exempt minimum of a zero-data account.
pub fn spendable(lamports: u64, rent: &Rent) -> u64 {
    lamports.saturating_sub(rent.minimum_balance(0))
}

/// [`Vault`] over a System-owned market vault PDA.
///
/// Transfers run through the System Program; outgoing ones are signed with
/// the vault seeds. `counterparty` is the only account this instance will
/// move funds to or from.
pub struct SystemVault<'a, 'info> {
    vault: AccountInfo<'info>,
    counterparty: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    vault_seeds: &'a [&'a [u8]],
    available: u64,
}

impl<'a, 'info> SystemVault<'a, 'info> {
    pub fn new(
        vault: AccountInfo<'info>,
        counterparty: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        vault_seeds: &'a [&'a [u8]],
    ) -> Result<Self> {
        let available = available_lamports(&vault)?;
        Ok(Self {
            vault,
            counterparty,
            system_program,
            vault_seeds,
            available,
        })
    }
}

impl Vault for SystemVault<'_, '_> {
    fn balance(&self) -> u64 {
        self.available
    }

    fn deposit(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(
            *from,
            self.counterparty.key(),
            SettlementError::UnauthorizedOwner
        );
        let available = self
            .available
            .checked_add(amount)
            .ok_or(SettlementError::ArithmeticOverflow)?;

        system_program::transfer(
            CpiContext::new(
                self.system_program.clone(),
                system_program::Transfer {
                    from: self.counterparty.clone(),
                    to: self.vault.clone(),
                },
            ),
            amount,
        )?;

        self.available = available;
        Ok(())
    }

    fn disburse(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(
            *to,
            self.counterparty.key(),
            SettlementError::UnauthorizedOwner
        );
        require!(
            amount <= self.available,
            SettlementError::InsufficientVaultBalance
        );
        if amount == 0 {
            return Ok(());
        }

        system_program::transfer(
            CpiContext::new_with_signer(
                self.system_program.clone(),
                system_program::Transfer {
                    from: self.vault.clone(),
                    to: self.counterparty.clone(),
                },
                &[self.vault_seeds],
            ),
            amount,
        )?;

        self.available -= amount;
        Ok(())
    }
}
