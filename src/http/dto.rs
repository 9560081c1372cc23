//! Request and response bodies for the JSON API
//!
//! Balances go out as JSON numbers. Incoming amounts accept either a JSON number
//! or a numeric string, and must convert to a decimal without rounding: at most
//! 28 fractional digits and a magnitude below about 7.9e28.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::core::TransferOutcome;

const SUCCESS: &str = "success";

/// Body of `POST /api/transfer`
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: RawAmount,
}

impl TransferRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_username("sender", &self.sender)?;
        require_username("recipient", &self.recipient)
    }
}

/// Body of `POST /api/balance`
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustRequest {
    pub username: String,
    pub amount: RawAmount,
}

impl AdjustRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_username("username", &self.username)
    }
}

/// An `amount` field as sent by the client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Convert to a decimal without rounding
    ///
    /// A number is taken at its shortest round-trip decimal form, so `0.1`
    /// becomes exactly `0.1`. Text that is not a number at all is malformed;
    /// a number the decimal type can't hold exactly is unsupported.
    pub fn to_decimal(&self) -> Result<Decimal, ApiError> {
        match self {
            RawAmount::Number(value) => exact_from_f64(*value),
            RawAmount::Text(text) => {
                let text = text.trim();
                if let Ok(amount) = Decimal::from_str_exact(text) {
                    return Ok(amount);
                }
                let value: f64 = text
                    .parse()
                    .map_err(|_| ApiError::malformed(format!("amount `{}` is not a number", text)))?;
                exact_from_f64(value)
            }
        }
    }
}

fn exact_from_f64(value: f64) -> Result<Decimal, ApiError> {
    // f64 Display never uses exponent notation, so every finite value is a plain decimal string
    Decimal::from_str_exact(&value.to_string())
        .map_err(|_| ApiError::unsupported_amount(value.to_string()))
}

/// Query string of `GET /api/balance`
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceQuery {
    pub username: String,
}

impl BalanceQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_username("username", &self.username)
    }
}

fn require_username(field: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::malformed(format!("field `{}` must not be empty", field)));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferResponse {
    pub status: &'static str,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub sender_balance: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub recipient_balance: Decimal,
}

impl From<TransferOutcome> for TransferResponse {
    fn from(outcome: TransferOutcome) -> Self {
        TransferResponse {
            status: SUCCESS,
            sender_balance: outcome.sender_balance,
            recipient_balance: outcome.recipient_balance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdjustResponse {
    pub status: &'static str,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
}

impl AdjustResponse {
    pub fn new(balance: Decimal) -> Self {
        AdjustResponse {
            status: SUCCESS,
            balance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
}

/// Structured body for business errors
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: &'static str,
}

impl ErrorBody {
    pub fn new(message: &'static str) -> Self {
        ErrorBody {
            status: "error",
            message,
        }
    }
}
