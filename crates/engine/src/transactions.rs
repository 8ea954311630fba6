//! Personal lending primitives.
//!
//! A `Transaction` records money given to (`given`) or borrowed from
//! (`taken`) a person, together with the date it should be settled by. Its
//! `status` is the only field that may change after creation.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DbErr, entity::prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    util::{parse_uuid, require, require_amount, require_text},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionType {
    /// Money lent out, to be received back.
    Given,
    /// Money borrowed, to be paid back.
    Taken,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::Taken => "taken",
        }
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "given" => Ok(Self::Given),
            "taken" => Ok(Self::Taken),
            other => Err(EngineError::InvalidField(format!(
                "invalid transaction type: {other} (expected given or taken)"
            ))),
        }
    }
}

/// Settlement state. Any state may move to any other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TransactionStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(EngineError::InvalidField(format!(
                "invalid status: {other} (expected pending or completed)"
            ))),
        }
    }
}

/// Input for [`Engine::new_transaction`](crate::Engine::new_transaction).
///
/// `status` defaults to [`TransactionStatus::Pending`] when absent.
#[derive(Clone, Debug, Default)]
pub struct NewTransaction {
    pub transaction_type: Option<String>,
    pub person_name: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub amount: Option<f64>,
    pub recovery_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub transaction_type: TransactionType,
    pub person_name: String,
    pub transaction_date: DateTime<Utc>,
    pub amount: f64,
    pub recovery_date: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(cmd: NewTransaction, user_id: &str) -> ResultEngine<Self> {
        let transaction_type = require_text(cmd.transaction_type.as_deref(), "transactionType")?;
        let transaction_type = TransactionType::try_from(transaction_type.as_str())?;
        let person_name = require_text(cmd.person_name.as_deref(), "personName")?;
        let transaction_date = require(cmd.transaction_date, "transactionDate")?;
        let amount = require_amount(cmd.amount, "amount")?;
        let recovery_date = require(cmd.recovery_date, "recoveryDate")?;
        let status = match cmd.status.as_deref().map(str::trim) {
            Some(raw) => TransactionStatus::try_from(raw)?,
            None => TransactionStatus::default(),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            transaction_type,
            person_name,
            transaction_date,
            amount,
            recovery_date,
            status,
        })
    }

    /// Whether the transaction still represents an open obligation.
    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub transaction_type: String,
    pub person_name: String,
    pub transaction_date: DateTimeUtc,
    pub amount: f64,
    pub recovery_date: DateTimeUtc,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            user_id: ActiveValue::Set(tx.user_id.clone()),
            transaction_type: ActiveValue::Set(tx.transaction_type.as_str().to_string()),
            person_name: ActiveValue::Set(tx.person_name.clone()),
            transaction_date: ActiveValue::Set(tx.transaction_date),
            amount: ActiveValue::Set(tx.amount),
            recovery_date: ActiveValue::Set(tx.recovery_date),
            status: ActiveValue::Set(tx.status.as_str().to_string()),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        // Stored values were validated on the way in; a mismatch here means
        // the row was written by something else.
        let stored = |err: EngineError| EngineError::Database(DbErr::Type(err.to_string()));

        Ok(Self {
            id: parse_uuid(&model.id, "transaction")?,
            user_id: model.user_id,
            transaction_type: TransactionType::try_from(model.transaction_type.as_str())
                .map_err(stored)?,
            person_name: model.person_name,
            transaction_date: model.transaction_date,
            amount: model.amount,
            recovery_date: model.recovery_date,
            status: TransactionStatus::try_from(model.status.as_str()).map_err(stored)?,
        })
    }
}
