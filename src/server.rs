//! Server configuration and startup
//!
//! Builds a multi-threaded tokio runtime, binds the listener and serves the
//! router until Ctrl-C. In-flight requests are allowed to finish on shutdown.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

use crate::core::{Ledger, LedgerConfig};
use crate::http;

/// Port the service has always listened on
pub const DEFAULT_PORT: u16 = 8888;

/// Listener and runtime settings
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Address to bind
    pub bind: IpAddr,
    /// Port to bind
    pub port: u16,
    /// Directory static files are served from
    pub static_dir: PathBuf,
    /// Number of runtime worker threads
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("."),
            workers: num_cpus::get(),
        }
    }
}

impl ServerConfig {
    /// Create a ServerConfig, falling back to the default worker count for 0
    pub fn new(bind: IpAddr, port: u16, static_dir: PathBuf, workers: usize) -> Self {
        let workers = if workers == 0 {
            let default = num_cpus::get();
            warn!("Invalid worker count ({}), using default ({})", workers, default);
            default
        } else {
            workers
        };

        Self {
            bind,
            port,
            static_dir,
            workers,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Run the service until shutdown
///
/// # Errors
///
/// Returns an error if the runtime can't be created or the address can't be
/// bound. Request-level failures never end the server.
pub fn run(server: ServerConfig, ledger: LedgerConfig) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(server.workers)
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let listener = TcpListener::bind(server.socket_addr()).await?;
        let addr = listener.local_addr()?;

        let ledger = Arc::new(Ledger::new(ledger));
        info!(
            "New accounts start with {}, non-positive transfers {}",
            ledger.config().initial_balance,
            if ledger.config().allow_non_positive_transfers {
                "allowed"
            } else {
                "rejected"
            }
        );
        let app = http::router(ledger, &server.static_dir);

        info!("Server running at http://{}/", addr);
        info!("Transfer API available at http://{}/api/transfer", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested, draining connections"),
        Err(e) => {
            // Without a signal handler the server can only be killed
            error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
