use std::error::Error;

use api_types::{
    expense::ExpenseSummary, financial::FinancialSummary, transaction::TransactionSummary,
};
use clap::{Parser, Subcommand, ValueEnum};
use engine::Engine;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use server::auth::AuthKeys;

#[derive(Parser, Debug)]
#[command(name = "moneytrail_admin")]
#[command(about = "Admin utilities for MoneyTrail (tokens, migrations, summaries)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./moneytrail.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a bearer token for a user id.
    Token {
        #[arg(long)]
        user: String,
        /// Shared signing secret, same as the server's `jwt_secret`.
        #[arg(long, env = "MONEYTRAIL__SERVER__JWT_SECRET")]
        secret: String,
        #[arg(long, default_value_t = 24)]
        ttl_hours: i64,
    },
    /// Apply or inspect schema migrations.
    Migrate {
        #[arg(value_enum, default_value_t = MigrateAction::Up)]
        action: MigrateAction,
    },
    /// Print every summary of a user as JSON.
    Summary {
        #[arg(long)]
        user: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MigrateAction {
    Up,
    Down,
    Fresh,
    Status,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn print_summaries(engine: &Engine, user: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let expense = engine.expense_summary(user).await?;
    let financial = engine.financial_summary(user).await?;
    let transaction = engine.transaction_summary(user).await?;

    let report = serde_json::json!({
        "userId": user,
        "expense": ExpenseSummary {
            total_delayed_expenses: expense.total_delayed_expenses,
            total_room_expenses: expense.total_room_expenses,
            total_amount_to_pay: expense.total_amount_to_pay,
        },
        "financial": FinancialSummary {
            total_income: financial.total_income,
            total_expenses: financial.total_expenses,
            total_savings: financial.total_savings,
            total_sip: financial.total_sip,
        },
        "transaction": TransactionSummary {
            total_to_receive: transaction.total_to_receive,
            total_to_pay: transaction.total_to_pay,
        },
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn issue_token(
    user: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let user = user.trim();
    if user.is_empty() {
        return Err("user id must not be empty".into());
    }
    let ttl = chrono::Duration::try_hours(ttl_hours)
        .ok_or_else(|| format!("ttl of {ttl_hours} hours is out of range"))?;

    Ok(AuthKeys::from_secret(secret.as_bytes()).issue(user, ttl)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Token {
            user,
            secret,
            ttl_hours,
        } => {
            let token = issue_token(&user, &secret, ttl_hours)?;
            println!("{token}");
        }
        Command::Migrate { action } => {
            let db = Database::connect(&cli.database_url).await?;
            match action {
                MigrateAction::Up => migration::Migrator::up(&db, None).await?,
                MigrateAction::Down => migration::Migrator::down(&db, None).await?,
                MigrateAction::Fresh => migration::Migrator::fresh(&db).await?,
                MigrateAction::Status => migration::Migrator::status(&db).await?,
            }
            println!("migrate {action:?}: done");
        }
        Command::Summary { user } => {
            let db = connect_db(&cli.database_url).await?;
            let engine = Engine::builder().database(db).build().await?;
            print_summaries(&engine, &user).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_issued_for_trimmed_user() {
        let token = issue_token(" alice ", "secret", 1).unwrap();
        let claims = AuthKeys::from_secret(b"secret").verify(&token).unwrap();
        assert_eq!(claims.user_id, "alice");
    }

    #[test]
    fn huge_ttl_is_an_error() {
        assert!(issue_token("alice", "secret", i64::MAX).is_err());
        assert!(issue_token("alice", "secret", i64::MIN).is_err());
        assert!(issue_token("alice", "secret", 200_000_000_000_000).is_err());
    }

    #[test]
    fn blank_user_is_an_error() {
        assert!(issue_token("   ", "secret", 1).is_err());
    }

    #[test]
    fn migrate_defaults_to_up() {
        let cli = Cli::try_parse_from(["moneytrail_admin", "migrate"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Migrate {
                action: MigrateAction::Up
            }
        ));

        let cli = Cli::try_parse_from(["moneytrail_admin", "migrate", "fresh"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Migrate {
                action: MigrateAction::Fresh
            }
        ));

        assert!(Cli::try_parse_from(["moneytrail_admin", "migrate", "sideways"]).is_err());
    }
}
