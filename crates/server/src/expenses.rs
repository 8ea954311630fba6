//! Expense API endpoints

use api_types::{
    Message,
    expense::{Expense, ExpenseNew, ExpenseSummary},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{AppJson, Context, ServerError, parse_id, server::Owner, server::ServerState};

fn map_expense(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        user_id: expense.user_id,
        date: expense.date,
        expense_type: expense.expense_type.as_str().to_string(),
        amount: expense.amount,
    }
}

/// Handle requests for creating a new expense
pub async fn create(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
    AppJson(payload): AppJson<ExpenseNew>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let cmd = engine::NewExpense {
        date: payload.date.map(|dt| dt.with_timezone(&Utc)),
        expense_type: payload.expense_type,
        amount: payload.amount,
    };
    let expense = state
        .engine
        .new_expense(cmd, &user_id)
        .await
        .context("Error creating expense")?;
    tracing::debug!(%user_id, id = %expense.id, "expense created");

    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

/// Handle requests for listing the caller's expenses, newest first
pub async fn list(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<Expense>>, ServerError> {
    let expenses = state
        .engine
        .list_expenses(&user_id)
        .await
        .context("Error fetching expenses")?
        .into_iter()
        .map(map_expense)
        .collect();

    Ok(Json(expenses))
}

pub async fn summary(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
) -> Result<Json<ExpenseSummary>, ServerError> {
    let summary = state
        .engine
        .expense_summary(&user_id)
        .await
        .context("Error calculating summary")?;

    Ok(Json(ExpenseSummary {
        total_delayed_expenses: summary.total_delayed_expenses,
        total_room_expenses: summary.total_room_expenses,
        total_amount_to_pay: summary.total_amount_to_pay,
    }))
}

pub async fn remove(
    Extension(Owner(user_id)): Extension<Owner>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let id = parse_id(&id, "Expense")?;
    state
        .engine
        .delete_expense(id, &user_id)
        .await
        .context("Error deleting expense")?;
    tracing::debug!(%user_id, %id, "expense deleted");

    Ok(Json(Message {
        message: "Expense deleted successfully".to_string(),
    }))
}
