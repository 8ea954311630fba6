//! The module contains `FinancialRecord` and its storage model.
//!
//! A record is a monthly snapshot of income and outgoings. `net_saving` is
//! derived once, when the record is built, and persisted as is.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    util::{parse_uuid, require, require_amount},
};

/// Input for [`Engine::new_financial_record`](crate::Engine::new_financial_record).
#[derive(Clone, Debug, Default)]
pub struct NewFinancialRecord {
    pub date: Option<DateTime<Utc>>,
    pub monthly_income: Option<f64>,
    pub rent: Option<f64>,
    pub other_expenses: Option<f64>,
    pub room_expenses: Option<f64>,
    pub sip_amount: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FinancialRecord {
    pub id: Uuid,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub monthly_income: f64,
    pub rent: f64,
    pub other_expenses: f64,
    pub room_expenses: f64,
    pub sip_amount: f64,
    pub net_saving: f64,
}

impl FinancialRecord {
    /// Validate `cmd`, derive `net_saving` and build a record owned by `user_id`.
    pub fn new(cmd: NewFinancialRecord, user_id: &str) -> ResultEngine<Self> {
        let date = require(cmd.date, "date")?;
        let monthly_income = require_amount(cmd.monthly_income, "monthlyIncome")?;
        let rent = require_amount(cmd.rent, "rent")?;
        let other_expenses = require_amount(cmd.other_expenses, "otherExpenses")?;
        let room_expenses = require_amount(cmd.room_expenses, "roomExpenses")?;
        let sip_amount = require_amount(cmd.sip_amount, "sipAmount")?;
        let net_saving = net_saving(monthly_income, rent, other_expenses, room_expenses, sip_amount);
        if !net_saving.is_finite() {
            return Err(EngineError::InvalidField(
                "netSaving must be a finite number".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            date,
            monthly_income,
            rent,
            other_expenses,
            room_expenses,
            sip_amount,
            net_saving,
        })
    }

    /// Outgoings counted as expenses in the summary. SIP is tracked apart.
    pub fn expenses(&self) -> f64 {
        self.rent + self.other_expenses + self.room_expenses
    }
}

/// `income - (rent + other + room + sip)`. May be negative.
pub fn net_saving(income: f64, rent: f64, other: f64, room: f64, sip: f64) -> f64 {
    income - (rent + other + room + sip)
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "financial_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub date: DateTimeUtc,
    pub monthly_income: f64,
    pub rent: f64,
    pub other_expenses: f64,
    pub room_expenses: f64,
    pub sip_amount: f64,
    pub net_saving: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&FinancialRecord> for ActiveModel {
    fn from(record: &FinancialRecord) -> Self {
        Self {
            id: ActiveValue::Set(record.id.to_string()),
            user_id: ActiveValue::Set(record.user_id.clone()),
            date: ActiveValue::Set(record.date),
            monthly_income: ActiveValue::Set(record.monthly_income),
            rent: ActiveValue::Set(record.rent),
            other_expenses: ActiveValue::Set(record.other_expenses),
            room_expenses: ActiveValue::Set(record.room_expenses),
            sip_amount: ActiveValue::Set(record.sip_amount),
            net_saving: ActiveValue::Set(record.net_saving),
        }
    }
}

impl TryFrom<Model> for FinancialRecord {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "financial record")?,
            user_id: model.user_id,
            date: model.date,
            monthly_income: model.monthly_income,
            rent: model.rent,
            other_expenses: model.other_expenses,
            room_expenses: model.room_expenses,
            sip_amount: model.sip_amount,
            net_saving: model.net_saving,
        })
    }
}
