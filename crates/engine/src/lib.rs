//! Persistence and domain rules for the tracked resources.
//!
//! The [`Engine`] owns the database connection and exposes one set of
//! operations per resource. Every operation takes the owner id explicitly
//! and only ever touches rows carrying that id.

pub use error::EngineError;
pub use expenses::{Expense, ExpenseType, NewExpense};
pub use financial_records::{FinancialRecord, NewFinancialRecord, net_saving};
pub use ops::{Engine, EngineBuilder};
pub use summary::{ExpenseSummary, FinancialSummary, TransactionSummary};
pub use transactions::{NewTransaction, Transaction, TransactionStatus, TransactionType};

mod error;
mod expenses;
mod financial_records;
mod ops;
mod summary;
mod transactions;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
