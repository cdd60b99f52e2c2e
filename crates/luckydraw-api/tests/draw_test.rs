//! Integration tests for draws and history.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::TimeZone;
use luckydraw_core::entry::{Actor, HistoryEntry};
use luckydraw_test_support::{
    FailingHistoryStore, MockRng, ReadOnlyHistoryStore, RecordingHistoryStore, SequenceRng,
};
use serde_json::json;

#[tokio::test]
async fn test_generate_returns_values_in_range() {
    // Two teaser frames of three values, then the settled draw.
    let rng = SequenceRng::yielding(1, 10, &[4, 4, 7, 2, 9, 1, 5, 10, 3]);
    let app = common::build_test_app_with(rng, None);

    let (status, json) = common::post_json(
        app,
        "/api/generate",
        &json!({ "min": 1, "max": 10, "count": 3 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "generated");
    let values = json["values"].as_array().unwrap();
    assert_eq!(values.len(), 3);
    for v in values {
        let v = v.as_i64().unwrap();
        assert!((1..=10).contains(&v));
    }
    assert_eq!(json["values"], json!([5, 10, 3]));
    assert_eq!(json["frames"], json!([[4, 4, 7], [2, 9, 1]]));
}

#[tokio::test]
async fn test_unique_draw_has_distinct_values() {
    let quarters = [0.1, 0.35, 0.6, 0.85];
    let samples: Vec<f64> = quarters.iter().copied().cycle().take(12).collect();
    let app = common::build_test_app_with(SequenceRng::new(samples), None);

    let (status, json) = common::post_json(
        app,
        "/api/generate",
        &json!({ "min": 1, "max": 4, "count": 4, "unique": true }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let mut values: Vec<i64> = json["values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    values.sort_unstable();
    assert_eq!(values, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_history_is_newest_first_and_capped() {
    let app = common::build_test_app();

    for n in 1..=11 {
        let (status, _) = common::post_json(
            app.clone(),
            "/api/generate",
            &json!({ "min": n, "max": n }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = common::get_json(app, "/api/history").await;

    assert_eq!(status, StatusCode::OK);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0]["value"], "11");
    assert_eq!(entries[9]["value"], "2");
    assert_eq!(entries[0]["actor"], "user");
    assert_eq!(entries[0]["timestamp"], "2026-01-15T10:00:00.000Z");
}

#[tokio::test]
async fn test_rejected_draw_leaves_history_untouched() {
    let app = common::build_test_app();

    let (status, json) = common::post_json(
        app.clone(),
        "/api/generate",
        &json!({ "min": 1, "max": 2, "count": 3, "unique": true }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "range_exhausted");

    let (_, history) = common::get_json(app, "/api/history").await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn test_draws_are_forwarded_to_history_store() {
    let store = Arc::new(RecordingHistoryStore::default());
    let app = common::build_test_app_with(MockRng, Some(store.clone()));

    let (status, _) =
        common::post_json(app, "/api/generate", &json!({ "min": 5, "max": 5, "count": 2 })).await;

    assert_eq!(status, StatusCode::OK);
    let appended = store.appended_entries();
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].value, "5, 5");
    assert_eq!(appended[0].actor, Actor::User);
}

#[tokio::test]
async fn test_history_hydrates_from_store() {
    let earlier = chrono::Utc.with_ymd_and_hms(2026, 1, 14, 9, 0, 0).unwrap();
    let store = Arc::new(RecordingHistoryStore::new(vec![
        HistoryEntry::new(&[3], Actor::Admin, earlier),
        HistoryEntry::new(&[8, 1], Actor::User, earlier),
    ]));
    let app = common::build_hydrated_app(MockRng, store).await;

    let (status, json) = common::get_json(app, "/api/history").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["value"], "3");
    assert_eq!(json[0]["actor"], "admin");
    assert_eq!(json[1]["value"], "8, 1");
}

#[tokio::test]
async fn test_failing_history_store_does_not_fail_draws() {
    let app = common::build_test_app_with(
        MockRng,
        Some(Arc::new(FailingHistoryStore)),
    );

    let (status, _) =
        common::post_json(app.clone(), "/api/generate", &json!({ "min": 6, "max": 6 })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = common::get_json(app, "/api/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["value"], "6");
}

#[tokio::test]
async fn test_history_keeps_draws_the_store_failed_to_write() {
    let earlier = chrono::Utc.with_ymd_and_hms(2026, 1, 14, 9, 0, 0).unwrap();
    let store = Arc::new(ReadOnlyHistoryStore::new(vec![HistoryEntry::new(
        &[3],
        Actor::User,
        earlier,
    )]));
    let app = common::build_hydrated_app(MockRng, store).await;

    let (status, _) =
        common::post_json(app.clone(), "/api/generate", &json!({ "min": 6, "max": 6 })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = common::get_json(app, "/api/history").await;
    assert_eq!(json[0]["value"], "6");
    assert_eq!(json[1]["value"], "3");
}

#[tokio::test]
async fn test_overlapping_draws_in_different_sessions_both_settle() {
    let app = common::build_paced_app();
    let body = json!({ "min": 1, "max": 10 });

    let (a, b) = tokio::join!(
        common::generate_in_session(app.clone(), "alice", &body),
        common::generate_in_session(app.clone(), "bob", &body),
    );

    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    let (_, history) = common::get_json(app, "/api/history").await;
    assert_eq!(history.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_overlapping_anonymous_draws_both_settle() {
    let app = common::build_paced_app();
    let body = json!({});

    let (a, b) = tokio::join!(
        common::post_json(app.clone(), "/api/generate", &body),
        common::post_json(app.clone(), "/api/generate", &body),
    );

    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
}

#[tokio::test]
async fn test_overlapping_draws_in_one_session_record_once() {
    let app = common::build_paced_app();
    let body = json!({ "min": 1, "max": 10 });

    let (a, b) = tokio::join!(
        common::generate_in_session(app.clone(), "alice", &body),
        common::generate_in_session(app.clone(), "alice", &body),
    );

    let mut statuses = [a.0, b.0];
    statuses.sort_unstable_by_key(StatusCode::as_u16);
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
    let rejected = if a.0 == StatusCode::CONFLICT { &a.1 } else { &b.1 };
    assert_eq!(rejected["error"], "draw_in_progress");
    let (_, history) = common::get_json(app.clone(), "/api/history").await;
    assert_eq!(history.as_array().unwrap().len(), 1);

    let (status, _) = common::generate_in_session(app, "alice", &body).await;
    assert_eq!(status, StatusCode::OK);
}

