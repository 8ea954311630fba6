use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr};
use uuid::Uuid;

use crate::{
    EngineError, NewTransaction, ResultEngine, Transaction, TransactionStatus,
    TransactionSummary,
    transactions::{self, Column},
    util::require_text,
};

use super::{Engine, with_tx};

impl Engine {
    /// Validate and store a new transaction owned by `user_id`.
    pub async fn new_transaction(
        &self,
        cmd: NewTransaction,
        user_id: &str,
    ) -> ResultEngine<Transaction> {
        let tx = Transaction::new(cmd, user_id)?;
        let model = transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        Transaction::try_from(model)
    }

    /// All transactions of `user_id`, most recent `transaction_date` first.
    pub async fn list_transactions(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        transactions::Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::TransactionDate)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Amounts still to receive (`given`) and to pay (`taken`).
    pub async fn transaction_summary(&self, user_id: &str) -> ResultEngine<TransactionSummary> {
        let transactions = transactions::Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(TransactionSummary::from_transactions(&transactions))
    }

    /// Set the status of transaction `id` and return the updated record.
    ///
    /// `status` must be `pending` or `completed`; it is checked before the
    /// database is touched. Any status may replace any other.
    pub async fn update_transaction_status(
        &self,
        id: Uuid,
        status: Option<&str>,
        user_id: &str,
    ) -> ResultEngine<Transaction> {
        let status = require_text(status, "status")?;
        let status = TransactionStatus::try_from(status.as_str())?;

        with_tx!(self, |db_tx| {
            let result = transactions::Entity::update_many()
                .col_expr(Column::Status, Expr::value(status.as_str()))
                .filter(Column::Id.eq(id.to_string()))
                .filter(Column::UserId.eq(user_id))
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::KeyNotFound("Transaction".to_string()));
            }

            let model = transactions::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("Transaction".to_string()))?;
            Transaction::try_from(model)
        })
    }

    pub async fn delete_transaction(&self, id: Uuid, user_id: &str) -> ResultEngine<()> {
        let result = transactions::Entity::delete_many()
            .filter(Column::Id.eq(id.to_string()))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Transaction".to_string()));
        }
        Ok(())
    }
}
