//! Account-related types for the ledger service
//!
//! This module defines the Account structure and the identifiers and defaults
//! used to create accounts on first reference.

use rust_decimal::Decimal;
use serde::Serialize;

/// Account identifier
///
/// Usernames are case-sensitive and must be non-empty.
pub type Username = String;

/// Balance given to an account the first time its username is referenced
pub const DEFAULT_INITIAL_BALANCE: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Snapshot of a single account
///
/// The ledger stores balances only; an `Account` is built when a caller asks
/// for a listing and is not kept in sync with later mutations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    /// The owner of the balance
    pub username: Username,

    /// Current balance
    ///
    /// May be negative: adjustments are unconstrained and only transfers
    /// check the sender's funds.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
}

impl Account {
    /// Create an account snapshot
    pub fn new(username: impl Into<Username>, balance: Decimal) -> Self {
        Account {
            username: username.into(),
            balance,
        }
    }
}
