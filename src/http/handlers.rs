//! Request handlers for the balance API
//!
//! Bodies are read as raw bytes and decoded here, so a missing or unusual
//! `Content-Type` header doesn't stop an otherwise valid JSON request.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::de::DeserializeOwned;

use super::dto::{
    AdjustRequest, AdjustResponse, BalanceQuery, BalanceResponse, TransferRequest,
    TransferResponse,
};
use super::error::ApiError;
use crate::core::Ledger;

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// `POST /api/transfer`
pub async fn transfer_funds(
    State(ledger): State<Arc<Ledger>>,
    body: Bytes,
) -> Result<Json<TransferResponse>, ApiError> {
    let request: TransferRequest = parse_body(&body)?;
    request.validate()?;
    let amount = request.amount.to_decimal()?;

    let outcome = ledger.transfer(&request.sender, &request.recipient, amount)?;
    Ok(Json(outcome.into()))
}

/// `POST /api/balance`
pub async fn adjust_balance(
    State(ledger): State<Arc<Ledger>>,
    body: Bytes,
) -> Result<Json<AdjustResponse>, ApiError> {
    let request: AdjustRequest = parse_body(&body)?;
    request.validate()?;
    let amount = request.amount.to_decimal()?;

    let balance = ledger.adjust_balance(&request.username, amount)?;
    Ok(Json(AdjustResponse::new(balance)))
}

/// `GET /api/balance?username=U`
pub async fn get_balance(
    State(ledger): State<Arc<Ledger>>,
    query: Result<Query<BalanceQuery>, QueryRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let Query(query) = query?;
    query.validate()?;

    let balance = ledger.get_balance(&query.username)?;
    Ok(Json(BalanceResponse { balance }))
}
