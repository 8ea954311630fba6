//! Initial schema migration.
//!
//! Creates one table per tracked resource. Every row carries the owning
//! `user_id`; there are no foreign keys between the tables.
//!
//! - `expenses`: dated expenses classified by `expense_type`
//! - `financial_records`: monthly income/outgoings with the derived `net_saving`
//! - `transactions`: money given to or taken from a person, with a status

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    UserId,
    Date,
    ExpenseType,
    Amount,
}

#[derive(Iden)]
enum FinancialRecords {
    Table,
    Id,
    UserId,
    Date,
    MonthlyIncome,
    Rent,
    OtherExpenses,
    RoomExpenses,
    SipAmount,
    NetSaving,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    UserId,
    TransactionType,
    PersonName,
    TransactionDate,
    Amount,
    RecoveryDate,
    Status,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::UserId).string().not_null())
                    .col(ColumnDef::new(Expenses::Date).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::ExpenseType).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-user_id-date")
                    .table(Expenses::Table)
                    .col(Expenses::UserId)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Financial records
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(FinancialRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinancialRecords::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FinancialRecords::UserId).string().not_null())
                    .col(ColumnDef::new(FinancialRecords::Date).timestamp().not_null())
                    .col(
                        ColumnDef::new(FinancialRecords::MonthlyIncome)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinancialRecords::Rent).double().not_null())
                    .col(
                        ColumnDef::new(FinancialRecords::OtherExpenses)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinancialRecords::RoomExpenses)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinancialRecords::SipAmount).double().not_null())
                    .col(ColumnDef::new(FinancialRecords::NetSaving).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-financial_records-user_id-date")
                    .table(FinancialRecords::Table)
                    .col(FinancialRecords::UserId)
                    .col(FinancialRecords::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::TransactionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::PersonName).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::TransactionDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Amount).double().not_null())
                    .col(
                        ColumnDef::new(Transactions::RecoveryDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-transaction_date")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FinancialRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        Ok(())
    }
}
