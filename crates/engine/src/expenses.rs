//! The module contains `Expense` and its storage model.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    ResultEngine,
    util::{parse_uuid, require, require_amount, require_text},
};

/// Classification of an expense.
///
/// `delayed` and `room` feed dedicated summary totals; every other category
/// is kept verbatim and only counts towards the overall total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpenseType {
    Delayed,
    Room,
    Other(String),
}

impl ExpenseType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Delayed => "delayed",
            Self::Room => "room",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl From<String> for ExpenseType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "delayed" => Self::Delayed,
            "room" => Self::Room,
            _ => Self::Other(value),
        }
    }
}

/// Input for [`Engine::new_expense`](crate::Engine::new_expense).
///
/// Fields are optional so missing values surface as
/// [`EngineError::InvalidField`](crate::EngineError::InvalidField) instead of
/// a decoding failure.
#[derive(Clone, Debug, Default)]
pub struct NewExpense {
    pub date: Option<DateTime<Utc>>,
    pub expense_type: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub expense_type: ExpenseType,
    pub amount: f64,
}

impl Expense {
    /// Validate `cmd` and build a new expense owned by `user_id`.
    pub fn new(cmd: NewExpense, user_id: &str) -> ResultEngine<Self> {
        let date = require(cmd.date, "date")?;
        let expense_type = require_text(cmd.expense_type.as_deref(), "expenseType")?;
        let amount = require_amount(cmd.amount, "amount")?;

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            date,
            expense_type: ExpenseType::from(expense_type),
            amount,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub date: DateTimeUtc,
    pub expense_type: String,
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            user_id: ActiveValue::Set(expense.user_id.clone()),
            date: ActiveValue::Set(expense.date),
            expense_type: ActiveValue::Set(expense.expense_type.as_str().to_string()),
            amount: ActiveValue::Set(expense.amount),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            user_id: model.user_id,
            date: model.date,
            expense_type: ExpenseType::from(model.expense_type),
            amount: model.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    #[test]
    fn known_types_are_recognised() {
        assert_eq!(ExpenseType::from("delayed".to_string()), ExpenseType::Delayed);
        assert_eq!(ExpenseType::from("room".to_string()), ExpenseType::Room);
        assert_eq!(
            ExpenseType::from("groceries".to_string()),
            ExpenseType::Other("groceries".to_string())
        );
    }

    #[test]
    fn other_type_round_trips_verbatim() {
        let kind = ExpenseType::from("Travel".to_string());
        assert_eq!(kind.as_str(), "Travel");
    }

    #[test]
    fn new_trims_type() {
        let expense = Expense::new(
            NewExpense {
                date: Some(Utc::now()),
                expense_type: Some(" room ".to_string()),
                amount: Some(120.5),
            },
            "alice",
        )
        .unwrap();

        assert_eq!(expense.expense_type, ExpenseType::Room);
        assert_eq!(expense.user_id, "alice");
    }

    #[test]
    fn new_requires_date() {
        let err = Expense::new(
            NewExpense {
                date: None,
                expense_type: Some("room".to_string()),
                amount: Some(1.0),
            },
            "alice",
        )
        .unwrap_err();

        assert_eq!(err, EngineError::InvalidField("date is required".to_string()));
    }
}
