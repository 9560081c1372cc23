//! Ledger Service Library
//! # Overview
//!
//! This library provides an HTTP service that tracks per-user balances and
//! transfers funds between them. All state lives in memory and is lost on
//! restart.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, LedgerError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Balance queries, adjustments and transfers under one lock
//!   - [`core::store`] - In-memory balance storage
//!   - [`core::traits`] - The storage abstraction the ledger is written against
//! - [`http`] - axum router, handlers and the JSON wire format
//! - [`server`] - Runtime, listener and shutdown
//!
//! # Operations
//!
//! - **GetBalance**: Read a balance, creating the account with the initial balance if unseen
//! - **AdjustBalance**: Add a signed amount to a balance, with no floor
//! - **Transfer**: Move funds between two accounts; rejected when the sender has too little
//!
//! Transfers conserve the total amount of money; adjustments do not.

// Module declarations
pub mod cli;
pub mod core;
pub mod http;
pub mod server;
pub mod types;

pub use self::core::{BalanceStore, InMemoryBalanceStore, Ledger, LedgerConfig, TransferOutcome};
pub use server::ServerConfig;
pub use types::{Account, LedgerError, Username, DEFAULT_INITIAL_BALANCE};
