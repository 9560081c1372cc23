//! HTTP interface
//!
//! Routes:
//!
//! - `POST /api/transfer` - move funds between two users
//! - `POST /api/balance` - add a signed amount to a user's balance
//! - `GET /api/balance?username=U` - read a user's balance
//! - anything else - static files from the configured directory, 404 otherwise
//!
//! Every response, static files and errors included, carries
//! `Access-Control-Allow-Origin: *`.

pub mod dto;
pub mod error;
pub mod handlers;

use std::path::Path;
use std::sync::Arc;

use axum::handler::HandlerWithoutStateExt;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::core::Ledger;

pub use error::ApiError;

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Build the application router around a shared ledger
///
/// Requests that match no API route, or hit an API path with the wrong
/// method, fall through to the static file service. Only `GET` and `HEAD`
/// are served from disk; any other method there gets a 404.
pub fn router(ledger: Arc<Ledger>, static_dir: impl AsRef<Path>) -> Router {
    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .route(
            "/api/transfer",
            post(handlers::transfer_funds).fallback_service(static_files.clone()),
        )
        .route(
            "/api/balance",
            get(handlers::get_balance)
                .post(handlers::adjust_balance)
                .fallback_service(static_files.clone()),
        )
        .fallback_service(static_files)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .with_state(ledger)
}
