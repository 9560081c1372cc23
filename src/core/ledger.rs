//! Balance queries, adjustments and transfers
//!
//! This module provides the `Ledger` service, which owns a balance store behind
//! a single mutex and implements the three operations exposed over HTTP.
//!
//! # Design
//!
//! Every operation acquires the lock exactly once and performs its whole
//! read-modify-write sequence, including lazy account creation, while holding
//! it. A transfer's funds check, debit and credit therefore can't interleave
//! with any other operation, and no caller ever observes a half-applied
//! transfer.
//!
//! ```text
//! Ledger
//!     ├── Mutex<S: BalanceStore>  (all balances)
//!     └── LedgerConfig            (initial balance, transfer amount policy)
//! ```
//!
//! The lock is a `std::sync::Mutex`. Every critical section is O(1) and
//! never awaits, so handlers can call the ledger directly from async code.

use std::sync::{Mutex, MutexGuard};

use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::{BalanceStore, InMemoryBalanceStore};
use crate::types::{Account, LedgerError, DEFAULT_INITIAL_BALANCE};

/// Ledger behaviour settings
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerConfig {
    /// Balance assigned to an account on first reference
    pub initial_balance: Decimal,

    /// Accept transfers with an amount of zero or less
    ///
    /// When enabled a negative amount moves money from the recipient to the
    /// sender and skips the funds check, because `balance < amount` is false
    /// for any non-negative balance. Disabled by default.
    pub allow_non_positive_transfers: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_balance: DEFAULT_INITIAL_BALANCE,
            allow_non_positive_transfers: false,
        }
    }
}

/// Balances of both parties after a successful transfer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferOutcome {
    /// Sender's balance after the debit
    pub sender_balance: Decimal,

    /// Recipient's balance after the credit
    ///
    /// Equal to `sender_balance` for a transfer to oneself.
    pub recipient_balance: Decimal,
}

/// Thread-safe ledger service
///
/// `Ledger` is shared between request handlers as `Arc<Ledger>`. It is generic
/// over its storage so tests and alternative backends can inject their own
/// `BalanceStore`.
#[derive(Debug)]
pub struct Ledger<S = InMemoryBalanceStore> {
    store: Mutex<S>,
    config: LedgerConfig,
}

impl Ledger<InMemoryBalanceStore> {
    /// Create a ledger over an empty in-memory store
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_store(InMemoryBalanceStore::new(), config)
    }
}

impl Default for Ledger<InMemoryBalanceStore> {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl<S: BalanceStore> Ledger<S> {
    /// Create a ledger over an existing store
    pub fn with_store(store: S, config: LedgerConfig) -> Self {
        Self {
            store: Mutex::new(store),
            config,
        }
    }

    /// The settings this ledger was built with
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>, LedgerError> {
        self.store.lock().map_err(|_| LedgerError::LockPoisoned)
    }

    /// Get the current balance for `username`
    ///
    /// An unseen username is created with the initial balance first, so this
    /// read can add an account to the ledger.
    ///
    /// # Errors
    ///
    /// * `LedgerError::LockPoisoned` - a previous holder of the lock panicked
    pub fn get_balance(&self, username: &str) -> Result<Decimal, LedgerError> {
        let mut store = self.lock()?;
        Ok(store.get_or_create(username, self.config.initial_balance))
    }

    /// Add `amount` to the balance of `username` and return the new balance
    ///
    /// The amount may be negative and there is no floor at zero: this mints or
    /// burns money without any validation.
    ///
    /// # Errors
    ///
    /// * `LedgerError::ArithmeticOverflow` - the result is outside the decimal range;
    ///   the balance is left unchanged
    /// * `LedgerError::LockPoisoned` - a previous holder of the lock panicked
    pub fn adjust_balance(
        &self,
        username: &str,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let mut store = self.lock()?;
        let current = store.get_or_create(username, self.config.initial_balance);

        let updated = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("adjust", username))?;
        store.set(username, updated);

        debug!("Adjust: {} by {}: {} -> {}", username, amount, current, updated);
        Ok(updated)
    }

    /// Move `amount` from `sender` to `recipient`
    ///
    /// Both accounts are created with the initial balance if absent. The
    /// transfer is rejected when the sender's balance is strictly below
    /// `amount`; an equal balance drains the account to zero. A transfer to
    /// oneself checks funds and changes nothing.
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidAmount` - `amount <= 0` and the ledger does not allow it;
    ///   no account is created
    /// * `LedgerError::InsufficientFunds` - sender's balance is below `amount`
    /// * `LedgerError::ArithmeticOverflow` - a resulting balance is out of range
    /// * `LedgerError::LockPoisoned` - a previous holder of the lock panicked
    ///
    /// No balance changes on any error path.
    pub fn transfer(
        &self,
        sender: &str,
        recipient: &str,
        amount: Decimal,
    ) -> Result<TransferOutcome, LedgerError> {
        if amount <= Decimal::ZERO && !self.config.allow_non_positive_transfers {
            warn!("Transfer rejected: {} -> {}: invalid amount {}", sender, recipient, amount);
            return Err(LedgerError::invalid_amount(amount));
        }

        let mut store = self.lock()?;
        let initial = self.config.initial_balance;
        let sender_balance = store.get_or_create(sender, initial);
        let recipient_balance = store.get_or_create(recipient, initial);

        if sender_balance < amount {
            warn!(
                "Transfer rejected: {} -> {}: {} exceeds balance {}",
                sender, recipient, amount, sender_balance
            );
            return Err(LedgerError::insufficient_funds(sender, sender_balance, amount));
        }

        if sender == recipient {
            return Ok(TransferOutcome {
                sender_balance,
                recipient_balance: sender_balance,
            });
        }

        let new_sender = sender_balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", sender))?;
        let new_recipient = recipient_balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", recipient))?;

        store.set(sender, new_sender);
        store.set(recipient, new_recipient);

        info!("Transfer: {} -> {}: {}", sender, recipient, amount);
        info!(
            "New balances - {}: {}, {}: {}",
            sender, new_sender, recipient, new_recipient
        );

        Ok(TransferOutcome {
            sender_balance: new_sender,
            recipient_balance: new_recipient,
        })
    }

    /// Snapshot of every account, sorted by username
    ///
    /// Unlike `get_balance`, this never creates accounts.
    pub fn accounts(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.lock()?.accounts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::thread;

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn default_ledger() -> Ledger {
        Ledger::new(LedgerConfig::default())
    }

    #[test]
    fn test_get_balance_creates_account_with_default() {
        let ledger = default_ledger();

        assert!(ledger.accounts().unwrap().is_empty());
        assert_eq!(ledger.get_balance("alice").unwrap(), dec(500));

        let accounts = ledger.accounts().unwrap();
        assert_eq!(accounts, vec![Account::new("alice", dec(500))]);
    }

    #[test]
    fn test_get_balance_uses_configured_initial_balance() {
        let ledger = Ledger::new(LedgerConfig {
            initial_balance: dec(20),
            ..LedgerConfig::default()
        });

        assert_eq!(ledger.get_balance("alice").unwrap(), dec(20));
    }

    #[test]
    fn test_adjust_balance_has_no_floor() {
        let ledger = default_ledger();

        let balance = ledger.adjust_balance("alice", dec(-1000)).unwrap();

        assert_eq!(balance, dec(-500));
        assert_eq!(ledger.get_balance("alice").unwrap(), dec(-500));
    }

    #[test]
    fn test_adjust_balance_accumulates() {
        let ledger = default_ledger();

        ledger.adjust_balance("bob", Decimal::new(255, 1)).unwrap();
        let balance = ledger.adjust_balance("bob", Decimal::new(-55, 1)).unwrap();

        assert_eq!(balance, dec(520));
    }

    #[test]
    fn test_adjust_balance_overflow_leaves_balance_unchanged() {
        let ledger = default_ledger();

        let result = ledger.adjust_balance("alice", Decimal::MAX);

        assert_eq!(
            result,
            Err(LedgerError::arithmetic_overflow("adjust", "alice"))
        );
        assert_eq!(ledger.get_balance("alice").unwrap(), dec(500));
    }

    #[test]
    fn test_transfer_moves_funds_and_conserves_total() {
        let ledger = default_ledger();

        let outcome = ledger.transfer("alice", "bob", Decimal::new(1255, 1)).unwrap();

        assert_eq!(outcome.sender_balance, Decimal::new(3745, 1));
        assert_eq!(outcome.recipient_balance, Decimal::new(6255, 1));
        assert_eq!(outcome.sender_balance + outcome.recipient_balance, dec(1000));
    }

    #[test]
    fn test_transfer_full_balance_then_insufficient_funds() {
        let ledger = default_ledger();

        let outcome = ledger.transfer("alice", "bob", dec(500)).unwrap();
        assert_eq!(outcome.sender_balance, Decimal::ZERO);
        assert_eq!(outcome.recipient_balance, dec(1000));

        let result = ledger.transfer("alice", "bob", dec(1));
        assert_eq!(
            result,
            Err(LedgerError::insufficient_funds("alice", Decimal::ZERO, dec(1)))
        );

        assert_eq!(ledger.get_balance("alice").unwrap(), Decimal::ZERO);
        assert_eq!(ledger.get_balance("bob").unwrap(), dec(1000));
    }

    #[test]
    fn test_insufficient_funds_still_creates_accounts() {
        let ledger = default_ledger();

        let result = ledger.transfer("alice", "bob", dec(501));

        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(
            ledger.accounts().unwrap(),
            vec![Account::new("alice", dec(500)), Account::new("bob", dec(500))]
        );
    }

    #[test]
    fn test_self_transfer_is_noop_that_checks_funds() {
        let ledger = default_ledger();

        let outcome = ledger.transfer("alice", "alice", dec(100)).unwrap();
        assert_eq!(outcome.sender_balance, dec(500));
        assert_eq!(outcome.recipient_balance, dec(500));

        let result = ledger.transfer("alice", "alice", dec(600));
        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(ledger.get_balance("alice").unwrap(), dec(500));
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(dec(-100))]
    fn test_non_positive_transfer_rejected_by_default(#[case] amount: Decimal) {
        let ledger = default_ledger();

        let result = ledger.transfer("alice", "bob", amount);

        assert_eq!(result, Err(LedgerError::invalid_amount(amount)));
        assert!(ledger.accounts().unwrap().is_empty());
    }

    #[test]
    fn test_negative_transfer_reverses_direction_when_allowed() {
        let ledger = Ledger::new(LedgerConfig {
            allow_non_positive_transfers: true,
            ..LedgerConfig::default()
        });
        ledger.adjust_balance("alice", dec(-500)).unwrap();

        // Sender has nothing, yet the funds check passes for a negative amount
        let outcome = ledger.transfer("alice", "bob", dec(-200)).unwrap();

        assert_eq!(outcome.sender_balance, dec(200));
        assert_eq!(outcome.recipient_balance, dec(300));
    }

    #[test]
    fn test_concurrent_transfers_have_no_lost_updates() {
        let ledger = Arc::new(default_ledger());
        let amount = Decimal::new(5, 0);
        let mut handles = vec![];

        // 100 transfers of 5 drain alice's 500 exactly
        for _ in 0..100 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                ledger.transfer("alice", "bob", amount).unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.get_balance("alice").unwrap(), Decimal::ZERO);
        assert_eq!(ledger.get_balance("bob").unwrap(), dec(1000));
    }

    #[test]
    fn test_concurrent_overdraw_attempts_never_go_negative() {
        let ledger = Arc::new(default_ledger());
        let mut handles = vec![];

        // 20 threads race for 100 each; only five can succeed
        for i in 0..20 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                ledger.transfer("alice", &format!("user{}", i), dec(100)).is_ok()
            }));
        }

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 5);
        assert_eq!(ledger.get_balance("alice").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_concurrent_get_balance_creates_single_account() {
        let ledger = Arc::new(default_ledger());
        let mut handles = vec![];

        for _ in 0..10 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || ledger.get_balance("carol").unwrap()));
        }

        for handle in handles {
            assert_eq!(handle.join().unwrap(), dec(500));
        }
        assert_eq!(ledger.accounts().unwrap().len(), 1);
    }

    #[test]
    fn test_poisoned_lock_reports_error() {
        let ledger = Arc::new(default_ledger());

        let poisoner = Arc::clone(&ledger);
        let _ = thread::spawn(move || {
            let _guard = poisoner.store.lock().unwrap();
            panic!("poison the ledger lock");
        })
        .join();

        assert_eq!(ledger.get_balance("alice"), Err(LedgerError::LockPoisoned));
    }
}
