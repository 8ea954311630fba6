//! Per-user aggregates.
//!
//! Every summary is a pure reduction over records already loaded from the
//! store. All totals start at zero, so an empty input yields an all-zero
//! summary.

use crate::{Expense, ExpenseType, FinancialRecord, Transaction, TransactionType};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExpenseSummary {
    pub total_delayed_expenses: f64,
    pub total_room_expenses: f64,
    /// Sum of every expense, whatever its type.
    pub total_amount_to_pay: f64,
}

impl ExpenseSummary {
    pub fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        expenses
            .into_iter()
            .fold(Self::default(), |mut acc, expense| {
                match expense.expense_type {
                    ExpenseType::Delayed => acc.total_delayed_expenses += expense.amount,
                    ExpenseType::Room => acc.total_room_expenses += expense.amount,
                    ExpenseType::Other(_) => {}
                }
                acc.total_amount_to_pay += expense.amount;
                acc
            })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FinancialSummary {
    pub total_income: f64,
    /// Rent, other and room expenses. SIP is reported apart.
    pub total_expenses: f64,
    pub total_savings: f64,
    pub total_sip: f64,
}

impl FinancialSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a FinancialRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut acc, record| {
                acc.total_income += record.monthly_income;
                acc.total_expenses += record.expenses();
                acc.total_savings += record.net_saving;
                acc.total_sip += record.sip_amount;
                acc
            })
    }
}

/// Outstanding obligations. Completed transactions count towards neither total.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransactionSummary {
    pub total_to_receive: f64,
    pub total_to_pay: f64,
}

impl TransactionSummary {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        transactions
            .into_iter()
            .filter(|tx| tx.is_pending())
            .fold(Self::default(), |mut acc, tx| {
                match tx.transaction_type {
                    TransactionType::Given => acc.total_to_receive += tx.amount,
                    TransactionType::Taken => acc.total_to_pay += tx.amount,
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::TransactionStatus;

    fn expense(kind: &str, amount: f64) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            date: Utc::now(),
            expense_type: ExpenseType::from(kind.to_string()),
            amount,
        }
    }

    fn tx(kind: TransactionType, status: TransactionStatus, amount: f64) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            transaction_type: kind,
            person_name: "Ravi".to_string(),
            transaction_date: Utc::now(),
            amount,
            recovery_date: Utc::now(),
            status,
        }
    }

    #[test]
    fn empty_inputs_give_zero_totals() {
        assert_eq!(ExpenseSummary::from_expenses(&[]), ExpenseSummary::default());
        assert_eq!(FinancialSummary::from_records(&[]), FinancialSummary::default());
        assert_eq!(
            TransactionSummary::from_transactions(&[]),
            TransactionSummary::default()
        );
    }

    #[test]
    fn expenses_split_by_type() {
        let expenses = vec![
            expense("delayed", 100.0),
            expense("room", 250.0),
            expense("delayed", 50.0),
            expense("food", 30.0),
        ];

        let summary = ExpenseSummary::from_expenses(&expenses);

        assert_eq!(
            summary,
            ExpenseSummary {
                total_delayed_expenses: 150.0,
                total_room_expenses: 250.0,
                total_amount_to_pay: 430.0,
            }
        );
    }

    #[test]
    fn financial_totals() {
        let record = |income: f64, sip: f64| {
            let mut record = FinancialRecord {
                id: Uuid::new_v4(),
                user_id: "alice".to_string(),
                date: Utc::now(),
                monthly_income: income,
                rent: 1000.0,
                other_expenses: 200.0,
                room_expenses: 300.0,
                sip_amount: sip,
                net_saving: 0.0,
            };
            record.net_saving = crate::financial_records::net_saving(
                record.monthly_income,
                record.rent,
                record.other_expenses,
                record.room_expenses,
                record.sip_amount,
            );
            record
        };

        let summary = FinancialSummary::from_records(&[record(5000.0, 500.0), record(4000.0, 0.0)]);

        assert_eq!(
            summary,
            FinancialSummary {
                total_income: 9000.0,
                total_expenses: 3000.0,
                total_savings: 5500.0,
                total_sip: 500.0,
            }
        );
    }

    #[test]
    fn only_pending_transactions_count() {
        let transactions = vec![
            tx(TransactionType::Given, TransactionStatus::Pending, 100.0),
            tx(TransactionType::Given, TransactionStatus::Completed, 1000.0),
            tx(TransactionType::Taken, TransactionStatus::Pending, 40.0),
            tx(TransactionType::Taken, TransactionStatus::Completed, 400.0),
            tx(TransactionType::Given, TransactionStatus::Pending, 5.0),
        ];

        let summary = TransactionSummary::from_transactions(&transactions);

        assert_eq!(
            summary,
            TransactionSummary {
                total_to_receive: 105.0,
                total_to_pay: 40.0,
            }
        );
    }
}
