//! Financial record API endpoints

use api_types::{
    Message,
    financial::{FinancialRecord, FinancialRecordNew, FinancialSummary},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{AppJson, Context, ServerError, parse_id, server::Owner, server::ServerState};

fn map_record(record: engine::FinancialRecord) -> FinancialRecord {
    FinancialRecord {
        id: record.id,
        user_id: record.user_id,
        date: record.date,
        monthly_income: record.monthly_income,
        rent: record.rent,
        other_expenses: record.other_expenses,
        room_expenses: record.room_expenses,
        sip_amount: record.sip_amount,
        net_saving: record.net_saving,
    }
}

/// Handle requests for creating a new financial record.
///
/// The stored `netSaving` is derived from the submitted components.
pub async fn create(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
    AppJson(payload): AppJson<FinancialRecordNew>,
) -> Result<(StatusCode, Json<FinancialRecord>), ServerError> {
    let cmd = engine::NewFinancialRecord {
        date: payload.date.map(|dt| dt.with_timezone(&Utc)),
        monthly_income: payload.monthly_income,
        rent: payload.rent,
        other_expenses: payload.other_expenses,
        room_expenses: payload.room_expenses,
        sip_amount: payload.sip_amount,
    };
    let record = state
        .engine
        .new_financial_record(cmd, &user_id)
        .await
        .context("Error creating record")?;
    tracing::debug!(%user_id, id = %record.id, "financial record created");

    Ok((StatusCode::CREATED, Json(map_record(record))))
}

pub async fn list(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<FinancialRecord>>, ServerError> {
    let records = state
        .engine
        .list_financial_records(&user_id)
        .await
        .context("Error fetching records")?
        .into_iter()
        .map(map_record)
        .collect();

    Ok(Json(records))
}

pub async fn summary(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
) -> Result<Json<FinancialSummary>, ServerError> {
    let summary = state
        .engine
        .financial_summary(&user_id)
        .await
        .context("Error calculating summary")?;

    Ok(Json(FinancialSummary {
        total_income: summary.total_income,
        total_expenses: summary.total_expenses,
        total_savings: summary.total_savings,
        total_sip: summary.total_sip,
    }))
}

pub async fn remove(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let id = parse_id(&id, "Record")?;
    state
        .engine
        .delete_financial_record(id, &user_id)
        .await
        .context("Error deleting record")?;
    tracing::debug!(%user_id, %id, "financial record deleted");

    Ok(Json(Message {
        message: "Record deleted successfully".to_string(),
    }))
}
