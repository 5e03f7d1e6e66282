mod common;

use sqlx::SqlitePool;

use gatehouse_checkin::{drain, DrainStats};
use gatehouse_db::repositories::PendingUpdateRepo;

use common::FakeBackend;

async fn enqueue(pool: &SqlitePool, booking_id: i64, status: &str) {
    let payload = format!(r#"{{"checkInStatus":"{status}"}}"#);
    PendingUpdateRepo::enqueue(pool, booking_id, &payload)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../db/migrations")]
async fn drain_delivers_in_submission_order(pool: SqlitePool) {
    enqueue(&pool, 1, "checkedIn").await;
    enqueue(&pool, 2, "checkedIn").await;
    enqueue(&pool, 1, "checkedOut").await;
    let backend = FakeBackend::default();

    let stats = drain(&pool, &backend).await.unwrap();

    assert_eq!(
        stats,
        DrainStats {
            delivered: 3,
            remaining: 0
        }
    );
    assert_eq!(backend.attempt_order(), vec![1, 2, 1]);
    assert_eq!(PendingUpdateRepo::depth(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn first_failure_stops_the_drain(pool: SqlitePool) {
    enqueue(&pool, 1, "checkedIn").await;
    enqueue(&pool, 2, "checkedIn").await;
    let backend = FakeBackend::failing();

    let stats = drain(&pool, &backend).await.unwrap();

    assert_eq!(
        stats,
        DrainStats {
            delivered: 0,
            remaining: 2
        }
    );
    // The row for booking 2 is never attempted once booking 1 fails.
    assert_eq!(backend.attempt_order(), vec![1]);
    assert_eq!(PendingUpdateRepo::depth(&pool).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delivered_rows_stay_delivered_across_a_mid_batch_failure(pool: SqlitePool) {
    enqueue(&pool, 1, "checkedIn").await;
    enqueue(&pool, 2, "checkedIn").await;
    let backend = FakeBackend::default();

    // First pass flushes everything; requeue one and break the backend.
    drain(&pool, &backend).await.unwrap();
    enqueue(&pool, 3, "checkedOut").await;
    backend.set_failing(true);

    let stats = drain(&pool, &backend).await.unwrap();

    assert_eq!(
        stats,
        DrainStats {
            delivered: 0,
            remaining: 1
        }
    );
    assert_eq!(backend.delivered_order().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undecodable_head_row_blocks_the_queue(pool: SqlitePool) {
    PendingUpdateRepo::enqueue(&pool, 1, "not json at all")
        .await
        .unwrap();
    enqueue(&pool, 2, "checkedIn").await;
    let backend = FakeBackend::default();

    let stats = drain(&pool, &backend).await.unwrap();

    assert_eq!(
        stats,
        DrainStats {
            delivered: 0,
            remaining: 2
        }
    );
    assert!(backend.attempt_order().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_queue_drains_to_nothing(pool: SqlitePool) {
    let backend = FakeBackend::default();

    let stats = drain(&pool, &backend).await.unwrap();

    assert_eq!(stats, DrainStats::default());
}
