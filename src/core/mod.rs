//! Core business logic module
//!
//! - `traits` - The storage abstraction the ledger is written against
//! - `store` - In-memory balance storage
//! - `ledger` - Balance queries, adjustments and transfers

pub mod ledger;
pub mod store;
pub mod traits;

pub use ledger::{Ledger, LedgerConfig, TransferOutcome};
pub use store::InMemoryBalanceStore;
pub use traits::BalanceStore;
