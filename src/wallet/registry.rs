use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use super::generate_keypair_hex;
use crate::error::{LedgerError, LedgerResult};

/// A wallet: user or miner-owned address with a balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: String,
    pub private_key: String,
    pub balance: Decimal,
    pub name: String,
}

/// Owns every account and is the only place balances change.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: HashMap<String, Account>,
    order: Vec<String>, // creation order, for listing
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account with a fresh key and zero balance.
    /// A blank or missing name becomes `User_<first 8 chars of address>`.
    pub fn create_account(&mut self, name: Option<&str>) -> Account {
        let (private_key, address) = generate_keypair_hex();
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("User_{}", &address[..8]),
        };
        let account = Account {
            address: address.clone(),
            private_key,
            balance: Decimal::ZERO,
            name,
        };
        self.order.push(address.clone());
        self.accounts.insert(address, account.clone());
        account
    }

    /// Administrative mint: credit `amount` with no source debited.
    pub fn allocate(&mut self, address: &str, amount: Decimal) -> LedgerResult<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        let account = self.get_mut(address)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        debug!(
            "ALLOCATE - {} +{} (balance now {})",
            account.name, amount, account.balance
        );
        Ok(account.balance)
    }

    /// Credit without the positive-amount check; used for rewards, which may be zero.
    pub fn credit(&mut self, address: &str, amount: Decimal) -> LedgerResult<()> {
        let account = self.get_mut(address)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }

    /// Check that crediting `amount` to `address` would not overflow.
    pub fn ensure_can_credit(&self, address: &str, amount: Decimal) -> LedgerResult<()> {
        self.get(address)?
            .balance
            .checked_add(amount)
            .map(|_| ())
            .ok_or(LedgerError::AmountOverflow)
    }

    pub fn balance(&self, address: &str) -> LedgerResult<Decimal> {
        self.get(address).map(|a| a.balance)
    }

    /// Check that `from` could pay `amount + fee` right now, without moving anything.
    pub fn ensure_can_pay(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
        fee: Decimal,
    ) -> LedgerResult<()> {
        let sender = self.get(from)?;
        self.get(to)?;
        let required = amount.checked_add(fee).ok_or(LedgerError::AmountOverflow)?;
        if sender.balance < required {
            return Err(LedgerError::InsufficientFunds {
                address: from.to_string(),
                required,
                available: sender.balance,
            });
        }
        Ok(())
    }

    /// Debit `amount + fee` from `from` and credit `amount` to `to`.
    /// Everything is checked before either balance changes.
    pub fn apply_transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        fee: Decimal,
    ) -> LedgerResult<()> {
        self.ensure_can_pay(from, to, amount, fee)?;
        let required = amount + fee;

        // A self-transfer nets out to just the fee.
        if from != to {
            self.get(to)?
                .balance
                .checked_add(amount)
                .ok_or(LedgerError::AmountOverflow)?;
        }

        let sender = self.get_mut(from)?;
        sender.balance -= required;
        let recipient = self.get_mut(to)?;
        recipient.balance += amount;
        Ok(())
    }

    /// Undo an earlier `apply_transfer` of the same arguments.
    pub fn revert_transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        fee: Decimal,
    ) -> LedgerResult<()> {
        if from == to {
            return self.credit(from, fee);
        }
        let returned = self.get(to)?.balance;
        if returned < amount {
            return Err(LedgerError::InsufficientFunds {
                address: to.to_string(),
                required: amount,
                available: returned,
            });
        }
        let refund = amount.checked_add(fee).ok_or(LedgerError::AmountOverflow)?;
        let restored = self
            .get(from)?
            .balance
            .checked_add(refund)
            .ok_or(LedgerError::AmountOverflow)?;

        self.get_mut(to)?.balance -= amount;
        self.get_mut(from)?.balance = restored;
        Ok(())
    }

    pub fn get(&self, address: &str) -> LedgerResult<&Account> {
        self.accounts
            .get(address)
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))
    }

    fn get_mut(&mut self, address: &str) -> LedgerResult<&mut Account> {
        self.accounts
            .get_mut(address)
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))
    }

    /// All accounts in creation order.
    pub fn accounts(&self) -> Vec<Account> {
        self.order
            .iter()
            .filter_map(|a| self.accounts.get(a))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }
}
