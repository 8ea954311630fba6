use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plain confirmation or not-found body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Failure body. `error` carries the underlying error text and is meant for
/// humans only.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Lenient date decoding for request bodies.
pub mod date {
    use chrono::{DateTime, FixedOffset, NaiveDate};
    use serde::{Deserialize, Deserializer, de};

    /// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
    pub fn parse(raw: &str) -> Option<DateTime<FixedOffset>> {
        let raw = raw.trim();
        DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc().fixed_offset())
        })
    }

    pub fn deserialize_optional<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}"))))
            .transpose()
    }
}

pub mod expense {
    use super::*;

    /// Request body for `POST /expense`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        #[serde(default, deserialize_with = "date::deserialize_optional")]
        pub date: Option<DateTime<FixedOffset>>,
        /// `delayed`, `room` or any other category.
        pub expense_type: Option<String>,
        pub amount: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Expense {
        pub id: Uuid,
        pub user_id: String,
        pub date: DateTime<Utc>,
        pub expense_type: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseSummary {
        pub total_delayed_expenses: f64,
        pub total_room_expenses: f64,
        pub total_amount_to_pay: f64,
    }
}

pub mod financial {
    use super::*;

    /// Request body for `POST /financial`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinancialRecordNew {
        #[serde(default, deserialize_with = "date::deserialize_optional")]
        pub date: Option<DateTime<FixedOffset>>,
        pub monthly_income: Option<f64>,
        pub rent: Option<f64>,
        pub other_expenses: Option<f64>,
        pub room_expenses: Option<f64>,
        pub sip_amount: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinancialRecord {
        pub id: Uuid,
        pub user_id: String,
        pub date: DateTime<Utc>,
        pub monthly_income: f64,
        pub rent: f64,
        pub other_expenses: f64,
        pub room_expenses: f64,
        pub sip_amount: f64,
        /// Computed at creation, never recomputed.
        pub net_saving: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinancialSummary {
        pub total_income: f64,
        pub total_expenses: f64,
        pub total_savings: f64,
        #[serde(rename = "totalSIP")]
        pub total_sip: f64,
    }
}

pub mod transaction {
    use super::*;

    /// Request body for `POST /transaction`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        /// `given` or `taken`.
        pub transaction_type: Option<String>,
        pub person_name: Option<String>,
        #[serde(default, deserialize_with = "date::deserialize_optional")]
        pub transaction_date: Option<DateTime<FixedOffset>>,
        pub amount: Option<f64>,
        #[serde(default, deserialize_with = "date::deserialize_optional")]
        pub recovery_date: Option<DateTime<FixedOffset>>,
        /// `pending` (default) or `completed`.
        pub status: Option<String>,
    }

    /// Request body for `PATCH /transaction/{id}/status`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionStatusUpdate {
        pub status: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: Uuid,
        pub user_id: String,
        pub transaction_type: String,
        pub person_name: String,
        pub transaction_date: DateTime<Utc>,
        pub amount: f64,
        pub recovery_date: DateTime<Utc>,
        pub status: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionSummary {
        pub total_to_receive: f64,
        pub total_to_pay: f64,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn date_accepts_plain_day_and_rfc3339() {
        let plain = date::parse("2025-01-15").unwrap();
        assert_eq!(plain, Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap());

        let full = date::parse("2025-01-15T10:30:00+05:30").unwrap();
        assert_eq!(full, Utc.with_ymd_and_hms(2025, 1, 15, 5, 0, 0).unwrap());

        assert!(date::parse("15/01/2025").is_none());
    }

    #[test]
    fn expense_new_reads_camel_case() {
        let payload: expense::ExpenseNew = serde_json::from_str(
            r#"{"date":"2025-02-01","expenseType":"room","amount":1200.5}"#,
        )
        .unwrap();

        assert_eq!(payload.expense_type.as_deref(), Some("room"));
        assert_eq!(payload.amount, Some(1200.5));
        assert!(payload.date.is_some());
    }

    #[test]
    fn missing_fields_decode_as_none() {
        let payload: transaction::TransactionNew = serde_json::from_str("{}").unwrap();
        assert!(payload.transaction_type.is_none());
        assert!(payload.transaction_date.is_none());
        assert!(payload.recovery_date.is_none());
    }

    #[test]
    fn invalid_date_is_a_decode_error() {
        let res = serde_json::from_str::<expense::ExpenseNew>(r#"{"date":"yesterday"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn financial_summary_uses_sip_acronym() {
        let json = serde_json::to_value(financial::FinancialSummary {
            total_income: 1.0,
            total_expenses: 2.0,
            total_savings: 3.0,
            total_sip: 4.0,
        })
        .unwrap();

        assert_eq!(json["totalSIP"], 4.0);
        assert_eq!(json["totalIncome"], 1.0);
    }

    #[test]
    fn error_body_omits_empty_error() {
        let json = serde_json::to_string(&ErrorBody {
            message: "Expense not found".to_string(),
            error: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"Expense not found"}"#);
    }
}
