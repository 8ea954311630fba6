use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, FinancialRecord, FinancialSummary, NewFinancialRecord, ResultEngine,
    financial_records::{self, Column},
};

use super::Engine;

impl Engine {
    /// Validate and store a new financial record owned by `user_id`.
    ///
    /// `net_saving` is computed here, once, and stored with the record.
    pub async fn new_financial_record(
        &self,
        cmd: NewFinancialRecord,
        user_id: &str,
    ) -> ResultEngine<FinancialRecord> {
        let record = FinancialRecord::new(cmd, user_id)?;
        let model = financial_records::ActiveModel::from(&record)
            .insert(&self.database)
            .await?;
        FinancialRecord::try_from(model)
    }

    pub async fn list_financial_records(
        &self,
        user_id: &str,
    ) -> ResultEngine<Vec<FinancialRecord>> {
        financial_records::Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::Date)
            .all(&self.database)
            .await?
            .into_iter()
            .map(FinancialRecord::try_from)
            .collect()
    }

    pub async fn financial_summary(&self, user_id: &str) -> ResultEngine<FinancialSummary> {
        let records = financial_records::Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(FinancialRecord::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(FinancialSummary::from_records(&records))
    }

    pub async fn delete_financial_record(&self, id: Uuid, user_id: &str) -> ResultEngine<()> {
        let result = financial_records::Entity::delete_many()
            .filter(Column::Id.eq(id.to_string()))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Record".to_string()));
        }
        Ok(())
    }
}
