use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Expense, ExpenseSummary, NewExpense, ResultEngine,
    expenses::{self, Column},
};

use super::Engine;

impl Engine {
    /// Validate and store a new expense owned by `user_id`.
    ///
    /// Returns the persisted expense, including its generated id.
    pub async fn new_expense(&self, cmd: NewExpense, user_id: &str) -> ResultEngine<Expense> {
        let expense = Expense::new(cmd, user_id)?;
        let model = expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Expense::try_from(model)
    }

    /// All expenses of `user_id`, most recent `date` first.
    pub async fn list_expenses(&self, user_id: &str) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    /// Totals over every expense of `user_id`.
    pub async fn expense_summary(&self, user_id: &str) -> ResultEngine<ExpenseSummary> {
        let expenses = expenses::Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(ExpenseSummary::from_expenses(&expenses))
    }

    /// Delete the expense `id` if it exists and belongs to `user_id`.
    ///
    /// Ownership and existence are checked by the same statement, so a
    /// concurrent delete of the same id observes `KeyNotFound`.
    pub async fn delete_expense(&self, id: Uuid, user_id: &str) -> ResultEngine<()> {
        let result = expenses::Entity::delete_many()
            .filter(Column::Id.eq(id.to_string()))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Expense".to_string()));
        }
        Ok(())
    }
}
