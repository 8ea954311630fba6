use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{
    Engine, EngineError, NewTransaction, TransactionStatus, TransactionSummary, TransactionType,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, d, 12, 0, 0).unwrap()
}

fn tx(kind: &str, d: u32, amount: f64) -> NewTransaction {
    NewTransaction {
        transaction_type: Some(kind.to_string()),
        person_name: Some("Ravi".to_string()),
        transaction_date: Some(day(d)),
        amount: Some(amount),
        recovery_date: Some(day(d + 1)),
        status: Some("pending".to_string()),
    }
}

#[tokio::test]
async fn new_transaction_round_trips() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .new_transaction(tx("given", 3, 750.0), "alice")
        .await
        .unwrap();
    assert_eq!(created.transaction_type, TransactionType::Given);
    assert_eq!(created.status, TransactionStatus::Pending);
    assert_eq!(created.person_name, "Ravi");
    assert_eq!(created.recovery_date, day(4));

    assert_eq!(engine.list_transactions("alice").await.unwrap(), vec![created]);
}

#[tokio::test]
async fn list_is_sorted_by_transaction_date_descending() {
    let (engine, _db) = engine_with_db().await;
    for d in [9, 2, 15] {
        engine
            .new_transaction(tx("taken", d, 10.0), "alice")
            .await
            .unwrap();
    }

    let dates: Vec<_> = engine
        .list_transactions("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.transaction_date)
        .collect();
    assert_eq!(dates, vec![day(15), day(9), day(2)]);
}

#[tokio::test]
async fn completing_a_transaction_removes_it_from_the_summary() {
    let (engine, _db) = engine_with_db().await;

    let lent = engine
        .new_transaction(tx("given", 1, 1000.0), "alice")
        .await
        .unwrap();
    let borrowed = engine
        .new_transaction(tx("taken", 2, 400.0), "alice")
        .await
        .unwrap();
    engine
        .new_transaction(tx("given", 3, 50.0), "alice")
        .await
        .unwrap();
    engine
        .new_transaction(tx("given", 3, 7777.0), "bob")
        .await
        .unwrap();

    assert_eq!(
        engine.transaction_summary("alice").await.unwrap(),
        TransactionSummary {
            total_to_receive: 1050.0,
            total_to_pay: 400.0,
        }
    );

    for id in [lent.id, borrowed.id] {
        let updated = engine
            .update_transaction_status(id, Some("completed"), "alice")
            .await
            .unwrap();
        assert_eq!(updated.status, TransactionStatus::Completed);
    }

    assert_eq!(
        engine.transaction_summary("alice").await.unwrap(),
        TransactionSummary {
            total_to_receive: 50.0,
            total_to_pay: 0.0,
        }
    );
}

#[tokio::test]
async fn status_can_move_back_to_pending() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .new_transaction(
            NewTransaction {
                status: Some("completed".to_string()),
                ..tx("taken", 1, 20.0)
            },
            "alice",
        )
        .await
        .unwrap();

    let updated = engine
        .update_transaction_status(created.id, Some("pending"), "alice")
        .await
        .unwrap();
    assert_eq!(updated.status, TransactionStatus::Pending);
    assert_eq!(updated.amount, 20.0);
    assert_eq!(
        engine.transaction_summary("alice").await.unwrap().total_to_pay,
        20.0
    );
}

#[tokio::test]
async fn status_update_is_owner_scoped() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .new_transaction(tx("given", 1, 20.0), "alice")
        .await
        .unwrap();

    let err = engine
        .update_transaction_status(created.id, Some("completed"), "bob")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Transaction".to_string()));

    let err = engine
        .update_transaction_status(Uuid::new_v4(), Some("completed"), "alice")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("Transaction".to_string()));

    let listed = engine.list_transactions("alice").await.unwrap();
    assert_eq!(listed[0].status, TransactionStatus::Pending);
}

#[tokio::test]
async fn invalid_status_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .new_transaction(tx("given", 1, 20.0), "alice")
        .await
        .unwrap();

    let err = engine
        .update_transaction_status(created.id, Some("settled"), "alice")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidField("invalid status: settled (expected pending or completed)".to_string())
    );

    let err = engine
        .update_transaction_status(created.id, None, "alice")
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidField("status is required".to_string()));
}

#[tokio::test]
async fn delete_twice_reports_not_found() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .new_transaction(tx("taken", 1, 20.0), "alice")
        .await
        .unwrap();

    engine.delete_transaction(created.id, "alice").await.unwrap();
    assert_eq!(
        engine
            .delete_transaction(created.id, "alice")
            .await
            .unwrap_err(),
        EngineError::KeyNotFound("Transaction".to_string())
    );
}
