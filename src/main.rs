//! Ledger Service
//!
//! HTTP server tracking per-user balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --port 9000 --static-dir public
//! cargo run -- --initial-balance 100 --workers 4
//! RUST_LOG=debug cargo run
//! ```
//!
//! # Exit Codes
//!
//! - 0: Clean shutdown (Ctrl-C)
//! - 1: Startup error (address in use, runtime creation failed, etc.)

use ledger_service::{cli, server};
use log::error;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::parse_args();

    if let Err(e) = server::run(args.to_server_config(), args.to_ledger_config()) {
        error!("Error: {}", e);
        process::exit(1);
    }
}
