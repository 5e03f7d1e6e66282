//! End-to-end unit scenario: snapshot reconcile, guest check-in, door
//! authorization, check-out, door denial.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

use gatehouse_access::{AccessHandler, AccessPolicy};
use gatehouse_core::message::AccessResult;

use common::{body_json, build_test_app, post, post_json, ScriptedBackend};

#[sqlx::test(migrations = "../db/migrations")]
async fn full_site_flow(pool: SqlitePool) {
    let backend = ScriptedBackend::with_snapshot(json!({
        "bookings": [
            {"id": 1, "usersId": 5, "checkInToken": "TOK1", "status": "active",
             "startDate": "2026-08-01", "endDate": "2026-08-30"}
        ],
        "rooms": [{"id": 10, "name": "room1"}],
        "relations": [{"bookingId": 1, "roomId": 10}],
        "rfidKeys": [
            {"id": 100, "keyValue": "CARD1", "isUsed": true, "ownerScope": "guest"}
        ],
        "rfidConnections": [
            {"keyValue": "CARD1", "roomId": 10, "roomName": "room1"}
        ]
    }));
    let handler = AccessHandler::new(pool.clone(), AccessPolicy::Standard);
    let auth_payload = r#"{"cardID":"CARD1","doorID":"room1"}"#;

    // Pull the snapshot into the local store.
    let response = post(build_test_app(pool.clone(), backend.clone()), "/sync").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Fresh booking: the door stays shut.
    let (_, decision) = handler.handle("hotel/room1/auth", auth_payload).await.unwrap();
    assert_eq!(decision.access_result, AccessResult::Deny);

    // Guest presents the booking token: check-in.
    let response = post_json(
        build_test_app(pool.clone(), backend.clone()),
        "/scan",
        json!({"token": "TOK1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["outcome"], "checkedIn");

    // Now the card opens the room.
    let (topic, decision) = handler.handle("hotel/room1/auth", auth_payload).await.unwrap();
    assert_eq!(topic, "hotel/room1/result");
    assert_eq!(decision.access_result, AccessResult::Ok);

    // Second scan: check-out.
    let response = post_json(
        build_test_app(pool.clone(), backend.clone()),
        "/scan",
        json!({"token": "TOK1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["outcome"], "checkedOut");

    // And the card is dead again.
    let (_, decision) = handler.handle("hotel/room1/auth", auth_payload).await.unwrap();
    assert_eq!(decision.access_result, AccessResult::Deny);

    // Both transitions were pushed upstream, check-in first.
    let pushes = backend.pushed();
    assert_eq!(pushes.len(), 2);
    assert_eq!(pushes[0].1.check_in_status.as_deref(), Some("checkedIn"));
    assert_eq!(pushes[1].1.check_in_status.as_deref(), Some("checkedOut"));
}
