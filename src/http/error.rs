//! API error type and its HTTP mapping
//!
//! Only business rule rejections carry a structured body. Every other failure
//! is treated as an unexpected fault: it is logged here and the client gets a
//! bare 500.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use thiserror::Error;

use super::dto::ErrorBody;
use crate::types::LedgerError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The ledger refused or failed the operation
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Request body or query string could not be decoded
    #[error("Malformed request: {message}")]
    Malformed { message: String },

    /// Amount is a number, but not one the ledger's decimal type holds exactly
    #[error("Unsupported amount {amount}: outside decimal range or precision")]
    UnsupportedAmount { amount: String },
}

impl ApiError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ApiError::Malformed {
            message: message.into(),
        }
    }

    pub fn unsupported_amount(amount: impl Into<String>) -> Self {
        ApiError::UnsupportedAmount {
            amount: amount.into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::malformed(error.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::malformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Ledger(LedgerError::InsufficientFunds { .. }) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new("Insufficient funds")),
            )
                .into_response(),
            ApiError::Ledger(LedgerError::InvalidAmount { .. }) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new("Invalid amount")),
            )
                .into_response(),
            ApiError::UnsupportedAmount { amount } => {
                warn!("Unsupported amount: {}", amount);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody::new("Unsupported amount")),
                )
                    .into_response()
            }
            ApiError::Ledger(fault) => {
                error!("Internal fault: {}", fault);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::Malformed { message } => {
                warn!("Malformed request: {}", message);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use rust_decimal::Decimal;

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[rstest]
    #[case::insufficient_funds(
        ApiError::from(LedgerError::insufficient_funds("alice", Decimal::ZERO, Decimal::ONE)),
        "Insufficient funds"
    )]
    #[case::invalid_amount(
        ApiError::from(LedgerError::invalid_amount(Decimal::NEGATIVE_ONE)),
        "Invalid amount"
    )]
    #[case::unsupported_amount(ApiError::unsupported_amount("1e30"), "Unsupported amount")]
    #[tokio::test]
    async fn test_business_errors_are_structured(
        #[case] error: ApiError,
        #[case] message: &str,
    ) {
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, serde_json::json!({"status": "error", "message": message}));
    }

    #[rstest]
    #[case::overflow(ApiError::from(LedgerError::arithmetic_overflow("adjust", "alice")))]
    #[case::poisoned(ApiError::from(LedgerError::LockPoisoned))]
    #[case::malformed(ApiError::malformed("missing field `amount`"))]
    #[tokio::test]
    async fn test_faults_are_bare_server_errors(#[case] error: ApiError) {
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_bytes(response).await.is_empty());
    }

    #[test]
    fn test_json_error_converts_to_malformed() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: ApiError = json_error.into();
        assert!(matches!(error, ApiError::Malformed { .. }));
    }
}
