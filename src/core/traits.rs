//! Core trait for balance storage
//!
//! The ledger is written against this trait rather than a concrete map so that
//! a durable backend can replace the in-memory one without changing the
//! ledger's contract.

use crate::types::Account;
use rust_decimal::Decimal;

/// Trait for storing per-user balances
///
/// Implementations are not required to be thread-safe: the ledger serialises
/// every call behind its own lock.
pub trait BalanceStore {
    /// Get the balance for `username`, creating it with `initial` if absent
    ///
    /// This is a read with a side effect: after the call the username is
    /// always present in the store.
    fn get_or_create(&mut self, username: &str, initial: Decimal) -> Decimal;

    /// Overwrite the balance for `username`
    fn set(&mut self, username: &str, balance: Decimal);

    /// Snapshot of all accounts, sorted by username
    fn accounts(&self) -> Vec<Account>;

    /// Number of accounts in the store
    fn len(&self) -> usize;

    /// Whether the store holds no accounts
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
