//! Error types for the ledger service
//!
//! This module defines the errors a ledger operation can return.
//!
//! # Error Categories
//!
//! - **Business errors**: insufficient funds, invalid transfer amounts. These are
//!   reported to the caller and leave every balance untouched.
//! - **Internal faults**: arithmetic overflow, a poisoned ledger lock. These are
//!   logged server-side and surface as a generic failure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for ledger operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Sender's balance is below the requested transfer amount
    ///
    /// The transfer is rejected and neither balance changes.
    #[error("Insufficient funds for {sender}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Username of the sender
        sender: String,
        /// Sender's balance at the time of the check
        available: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// Transfer amount is zero or negative while the ledger requires positive amounts
    #[error("Invalid transfer amount {amount}: must be greater than zero")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Balance arithmetic left the representable decimal range
    #[error("Arithmetic overflow in {operation} for {username}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account whose balance would overflow
        username: String,
    },

    /// A thread panicked while holding the ledger lock
    #[error("Ledger lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Create an InsufficientFunds error
    pub fn insufficient_funds(sender: &str, available: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            sender: sender.to_string(),
            available,
            requested,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, username: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            username: username.to_string(),
        }
    }
}
