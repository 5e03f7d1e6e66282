use sqlx::SqlitePool;

use gatehouse_db::repositories::PendingUpdateRepo;

#[sqlx::test]
async fn enqueue_preserves_submission_order(pool: SqlitePool) {
    let a = PendingUpdateRepo::enqueue(&pool, 1, r#"{"checkInStatus":"checkedIn"}"#)
        .await
        .unwrap();
    let b = PendingUpdateRepo::enqueue(&pool, 2, r#"{"checkInStatus":"checkedOut"}"#)
        .await
        .unwrap();
    assert!(a < b, "ids must be monotonically increasing");

    let rows = PendingUpdateRepo::oldest_first(&pool).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].booking_id, 1);
    assert_eq!(rows[1].booking_id, 2);
}

#[sqlx::test]
async fn delete_removes_only_delivered_row(pool: SqlitePool) {
    let a = PendingUpdateRepo::enqueue(&pool, 1, "{}").await.unwrap();
    PendingUpdateRepo::enqueue(&pool, 2, "{}").await.unwrap();

    PendingUpdateRepo::delete(&pool, a).await.unwrap();

    let rows = PendingUpdateRepo::oldest_first(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].booking_id, 2);
    assert_eq!(PendingUpdateRepo::depth(&pool).await.unwrap(), 1);
}
