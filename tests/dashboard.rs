//! End-to-end: native client against the mock analytics API

mod common;

use common::*;
use serde_json::json;
use std::time::Duration;
use syntech_analytics::{
    render_text, AnalyticsClient, AnalyticsSource, AnalyticsView, Bucket, Count, CounterValue,
    DisplayZone, FetchError, RenderOptions, RequestFailure, ViewPhase,
};

fn view_for(api: &MockApi) -> AnalyticsView {
    let client = AnalyticsClient::new(api.source()).unwrap();
    AnalyticsView::new(client, DisplayZone::Utc)
}

#[tokio::test]
async fn test_full_load_populates_every_field() {
    init_test_logging();
    let api = spawn_mock(healthy_routes()).await;
    let view = view_for(&api);

    view.mount().await.unwrap().unwrap();
    let state = view.state().await;

    assert_eq!(state.phase(), ViewPhase::Loaded);
    assert_eq!(state.total.len(), 3);
    assert_eq!(state.red_listed.len(), 2);
    assert_eq!(state.unlisted.len(), 1);
    assert_eq!(state.total[0].date, "Jan 1, 2024, 10:00 AM");
    assert_eq!(state.total[0].value(), Some(5.0));
    assert_eq!(state.total[2].value(), Some(13.0));
    assert_eq!(state.unlisted[0].date, "Jan 2, 2024, 03:30 PM");
    assert_eq!(state.approved, CounterValue::from(42.0));
    assert_eq!(state.rejected, CounterValue::from(7.0));

    let out = render_text(&state, &RenderOptions::default());
    assert!(out.contains("Approved Count: 42"));
    assert!(out.contains("Rejected Count: 7"));
}

#[tokio::test]
async fn test_one_failing_endpoint_fails_the_whole_load() {
    init_test_logging();
    let mut routes = healthy_routes();
    routes.insert(RED_LISTED.to_string(), MockRoute::status(500, "database offline"));
    let api = spawn_mock(routes).await;
    let view = view_for(&api);

    let err = view.mount().await.unwrap().unwrap_err();
    assert_eq!(
        err,
        FetchError::RedListed(RequestFailure::Status {
            status: 500,
            body: "database offline".to_string(),
        })
    );

    let state = view.state().await;
    assert!(!state.loading);
    assert!(state.total.is_empty());
    assert!(state.red_listed.is_empty());
    assert!(state.unlisted.is_empty());
    assert_eq!(state.approved, CounterValue(None));
    assert_eq!(state.rejected, CounterValue(None));
}

#[tokio::test]
async fn test_empty_data_renders_zero_counters_and_empty_charts() {
    let routes = [TOTAL, RED_LISTED, UNLISTED]
        .into_iter()
        .map(|p| (p.to_string(), MockRoute::json(json!([]))))
        .chain([
            (APPROVED.to_string(), MockRoute::json(json!({"count": 0}))),
            (REJECTED.to_string(), MockRoute::json(json!({"count": 0}))),
        ])
        .collect();
    let api = spawn_mock(routes).await;
    let view = view_for(&api);

    view.load().await.unwrap();
    let out = render_text(&view.state().await, &RenderOptions::default());

    assert!(out.contains("Approved Count: 0"));
    assert!(out.contains("Rejected Count: 0"));
    assert_eq!(out.matches("No data").count(), 3);
}

#[tokio::test]
async fn test_non_numeric_counts_pass_through() {
    let mut routes = healthy_routes();
    routes.insert(
        UNLISTED.to_string(),
        MockRoute::json(json!([
            {"date": "2024-01-01T00:00:00Z", "count": "5"},
            {"date": "2024-01-02T00:00:00Z", "count": "four"}
        ])),
    );
    routes.insert(APPROVED.to_string(), MockRoute::json(json!({"count": "42"})));
    let api = spawn_mock(routes).await;
    let view = view_for(&api);

    view.load().await.unwrap();
    let state = view.state().await;

    assert_eq!(state.approved_label(), "Approved Count: 42");
    assert_eq!(state.total.len(), 3);
    assert_eq!(state.unlisted[0].value(), Some(5.0));
    assert_eq!(state.unlisted[1].value(), None);
    assert_eq!(state.unlisted[1].count, Some(Count::Text("four".to_string())));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_failure() {
    let mut routes = healthy_routes();
    routes.insert(UNLISTED.to_string(), MockRoute::json(json!({"count": 3})));
    let api = spawn_mock(routes).await;
    let client = AnalyticsClient::new(api.source()).unwrap();

    let err = client.fetch_all().await.unwrap_err();
    assert_eq!(err.bucket(), Some(Bucket::Unlisted));
    assert!(matches!(err.failure(), Some(RequestFailure::Decode(_))));
}

#[tokio::test]
async fn test_missing_endpoint_names_the_bucket() {
    let mut routes = healthy_routes();
    routes.remove(APPROVED);
    let api = spawn_mock(routes).await;
    let client = AnalyticsClient::new(api.source()).unwrap();

    let err = client.fetch_all().await.unwrap_err();
    assert_eq!(err.bucket(), Some(Bucket::Approved));
    assert!(matches!(
        err.failure(),
        Some(RequestFailure::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_unmount_during_fetch_leaves_view_loading() {
    let mut routes = healthy_routes();
    let slow = MockRoute::json(json!({"count": 1})).delayed(Duration::from_secs(5));
    routes.insert(REJECTED.to_string(), slow);
    let api = spawn_mock(routes).await;
    let view = view_for(&api);

    let handle = view.mount();
    tokio::time::sleep(Duration::from_millis(100)).await;
    view.unmount();

    let result = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("load should stop promptly after unmount")
        .unwrap();
    assert_eq!(result, Err(FetchError::Cancelled));

    let state = view.state().await;
    assert_eq!(state.phase(), ViewPhase::Loading);
    assert!(state.total.is_empty());
    assert_eq!(state.approved, CounterValue(None));
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    let mut routes = healthy_routes();
    routes.insert(
        TOTAL.to_string(),
        MockRoute::json(json!([])).delayed(Duration::from_secs(5)),
    );
    let api = spawn_mock(routes).await;
    let mut source = api.source();
    source.request_timeout_secs = Some(1);
    let client = AnalyticsClient::new(source).unwrap();

    let err = client.fetch_all().await.unwrap_err();
    assert_eq!(err, FetchError::Total(RequestFailure::Timeout));
}
