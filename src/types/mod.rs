//! Types module
//!
//! Contains core data structures used throughout the application.
//! - `account`: Account snapshot, username alias and the default balance
//! - `error`: Error types for ledger operations

pub mod account;
pub mod error;

pub use account::{Account, Username, DEFAULT_INITIAL_BALANCE};
pub use error::LedgerError;
