//! Transactions API endpoints

use api_types::{
    Message,
    transaction::{Transaction, TransactionNew, TransactionStatusUpdate, TransactionSummary},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{AppJson, Context, ServerError, parse_id, server::Owner, server::ServerState};

fn map_transaction(tx: engine::Transaction) -> Transaction {
    Transaction {
        id: tx.id,
        user_id: tx.user_id,
        transaction_type: tx.transaction_type.as_str().to_string(),
        person_name: tx.person_name,
        transaction_date: tx.transaction_date,
        amount: tx.amount,
        recovery_date: tx.recovery_date,
        status: tx.status.as_str().to_string(),
    }
}

pub async fn create(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
    AppJson(payload): AppJson<TransactionNew>,
) -> Result<(StatusCode, Json<Transaction>), ServerError> {
    let cmd = engine::NewTransaction {
        transaction_type: payload.transaction_type,
        person_name: payload.person_name,
        transaction_date: payload.transaction_date.map(|dt| dt.with_timezone(&Utc)),
        amount: payload.amount,
        recovery_date: payload.recovery_date.map(|dt| dt.with_timezone(&Utc)),
        status: payload.status,
    };
    let tx = state
        .engine
        .new_transaction(cmd, &user_id)
        .await
        .context("Error creating transaction")?;
    tracing::debug!(%user_id, id = %tx.id, "transaction created");

    Ok((StatusCode::CREATED, Json(map_transaction(tx))))
}

/// Handle requests for listing the caller's transactions, newest
/// `transactionDate` first
pub async fn list(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    let transactions = state
        .engine
        .list_transactions(&user_id)
        .await
        .context("Error fetching transactions")?
        .into_iter()
        .map(map_transaction)
        .collect();

    Ok(Json(transactions))
}

/// Handle requests for the amounts still to receive and to pay
pub async fn summary(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
) -> Result<Json<TransactionSummary>, ServerError> {
    let summary = state
        .engine
        .transaction_summary(&user_id)
        .await
        .context("Error calculating summary")?;

    Ok(Json(TransactionSummary {
        total_to_receive: summary.total_to_receive,
        total_to_pay: summary.total_to_pay,
    }))
}

pub async fn update_status(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TransactionStatusUpdate>,
) -> Result<Json<Transaction>, ServerError> {
    let id = parse_id(&id, "Transaction")?;
    let tx = state
        .engine
        .update_transaction_status(id, payload.status.as_deref(), &user_id)
        .await
        .context("Error updating transaction")?;
    tracing::debug!(%user_id, %id, status = tx.status.as_str(), "transaction status updated");

    Ok(Json(map_transaction(tx)))
}

pub async fn remove(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let id = parse_id(&id, "Transaction")?;
    state
        .engine
        .delete_transaction(id, &user_id)
        .await
        .context("Error deleting transaction")?;
    tracing::debug!(%user_id, %id, "transaction deleted");

    Ok(Json(Message {
        message: "Transaction deleted successfully".to_string(),
    }))
}
