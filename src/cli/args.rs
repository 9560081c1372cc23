use crate::core::LedgerConfig;
use crate::server::{ServerConfig, DEFAULT_PORT};
use clap::Parser;
use rust_decimal::Decimal;
use std::net::IpAddr;
use std::path::PathBuf;

/// Track user balances and transfer funds over HTTP
#[derive(Parser, Debug)]
#[command(name = "ledger-service")]
#[command(about = "Track user balances and transfer funds over HTTP", long_about = None)]
pub struct CliArgs {
    /// Address to listen on
    #[arg(long = "bind", value_name = "ADDR", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to listen on
    #[arg(long = "port", value_name = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory served for every path outside the API
    #[arg(long = "static-dir", value_name = "DIR", default_value = ".")]
    pub static_dir: PathBuf,

    /// Balance given to a user the first time they are referenced
    #[arg(
        long = "initial-balance",
        value_name = "AMOUNT",
        default_value = "500",
        allow_negative_numbers = true
    )]
    pub initial_balance: Decimal,

    /// Accept transfers of zero or negative amounts
    #[arg(
        long = "allow-non-positive-transfers",
        help = "Accept transfers of zero or negative amounts (a negative amount pulls funds from the recipient without a funds check)"
    )]
    pub allow_non_positive_transfers: bool,

    /// Number of runtime worker threads
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of runtime worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,
}

impl CliArgs {
    /// Create a ServerConfig from CLI arguments
    pub fn to_server_config(&self) -> ServerConfig {
        let default = ServerConfig::default();
        ServerConfig::new(
            self.bind,
            self.port,
            self.static_dir.clone(),
            self.workers.unwrap_or(default.workers),
        )
    }

    /// Create a LedgerConfig from CLI arguments
    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            initial_balance: self.initial_balance,
            allow_non_positive_transfers: self.allow_non_positive_transfers,
        }
    }
}
