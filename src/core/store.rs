//! In-memory balance storage
//!
//! This module provides `InMemoryBalanceStore`, which keeps every balance in a
//! `HashMap` for the lifetime of the process. Nothing is persisted: all
//! balances are lost on restart.

use crate::core::traits::BalanceStore;
use crate::types::{Account, Username};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Balance storage backed by a `HashMap`
#[derive(Debug, Default)]
pub struct InMemoryBalanceStore {
    /// Map of usernames to balances
    balances: HashMap<Username, Decimal>,
}

impl InMemoryBalanceStore {
    /// Create an empty store
    pub fn new() -> Self {
        InMemoryBalanceStore {
            balances: HashMap::new(),
        }
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn get_or_create(&mut self, username: &str, initial: Decimal) -> Decimal {
        if let Some(balance) = self.balances.get(username) {
            return *balance;
        }
        self.balances.insert(username.to_string(), initial);
        initial
    }

    fn set(&mut self, username: &str, balance: Decimal) {
        match self.balances.get_mut(username) {
            Some(existing) => *existing = balance,
            None => {
                self.balances.insert(username.to_string(), balance);
            }
        }
    }

    fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .balances
            .iter()
            .map(|(username, balance)| Account::new(username.as_str(), *balance))
            .collect();
        accounts.sort_by(|a, b| a.username.cmp(&b.username));
        accounts
    }

    fn len(&self) -> usize {
        self.balances.len()
    }
}
