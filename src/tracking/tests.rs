use super::*;
use crate::http_handler::http_response::lookup::CelestialCoordinates;
use crate::http_handler::http_response::response_common::{LookupErrorBody, ResponseError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// Scripted lookup source: pops prepared outcomes in order and falls back to
/// a canned success once the script runs dry. Counts every call and records
/// the params each call was made with.
struct ScriptedSource {
    calls: AtomicUsize,
    seen_params: std::sync::Mutex<Vec<SearchParams>>,
    script: std::sync::Mutex<VecDeque<Result<CelestialCoordinates, ResponseError>>>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<CelestialCoordinates, ResponseError>>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen_params: std::sync::Mutex::new(Vec::new()),
            script: std::sync::Mutex::new(script.into()),
        })
    }

    fn call_count(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    fn last_params(&self) -> Option<SearchParams> {
        self.seen_params.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CoordinateSource for ScriptedSource {
    async fn lookup(&self, params: &SearchParams) -> Result<CelestialCoordinates, ResponseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_params.lock().unwrap().push(params.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CelestialCoordinates::test(&params.target, 10.0, 20.0)))
    }
}

fn mars_params() -> SearchParams {
    SearchParams { target: String::from("Mars"), lat: 40.0, lon: -74.0 }
}

fn mars_success() -> Result<CelestialCoordinates, ResponseError> {
    Ok(CelestialCoordinates::test("Mars", 120.5, 45.2))
}

#[tokio::test(start_paused = true)]
async fn manual_search_issues_one_lookup_and_stores_success() {
    let source = ScriptedSource::new(vec![mars_success()]);
    let (poller, rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.submit_search(mars_params()).await;

    assert_eq!(source.call_count(), 1);
    assert_eq!(source.last_params(), Some(mars_params()));

    let state = rx.borrow().clone();
    assert!(!state.loading);
    assert!(!state.tracking);
    match state.latest {
        Some(LookupResult::Success { target, azimuth, altitude, .. }) => {
            assert_eq!(target, "Mars");
            assert!((azimuth - 120.5).abs() < f64::EPSILON);
            assert!((altitude - 45.2).abs() < f64::EPSILON);
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn submitting_a_search_always_resets_tracking() {
    let source = ScriptedSource::new(vec![]);
    let (poller, rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.submit_search(mars_params()).await;
    poller.toggle_tracking().await;
    assert!(rx.borrow().tracking);

    poller.submit_search(mars_params()).await;
    assert!(!rx.borrow().tracking);
}

#[tokio::test(start_paused = true)]
async fn tracking_polls_every_period_with_stored_params_until_disabled() {
    let source = ScriptedSource::new(vec![]);
    let (poller, _rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.submit_search(mars_params()).await;
    assert_eq!(source.call_count(), 1);

    poller.toggle_tracking().await;
    // No immediate refresh; the first one lands a full period in.
    sleep(Duration::from_millis(4_999)).await;
    assert_eq!(source.call_count(), 1);

    sleep(Duration::from_millis(2)).await;
    assert_eq!(source.call_count(), 2);
    assert_eq!(source.last_params(), Some(mars_params()));

    sleep(Duration::from_millis(10_000)).await;
    assert_eq!(source.call_count(), 4);

    poller.toggle_tracking().await;
    sleep(Duration::from_millis(20_000)).await;
    assert_eq!(source.call_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn failed_background_refresh_keeps_previous_result_and_no_error() {
    let source = ScriptedSource::new(vec![
        mars_success(),
        Err(ResponseError::Transport(String::from("connection reset by peer"))),
    ]);
    let (poller, rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.submit_search(mars_params()).await;
    let before = rx.borrow().latest.clone();
    assert!(before.as_ref().is_some_and(LookupResult::is_success));

    poller.toggle_tracking().await;
    sleep(Duration::from_millis(5_001)).await;
    assert_eq!(source.call_count(), 2);

    // The failed refresh is swallowed: same success still on display, and
    // the loading flag belongs to manual searches only.
    let after = rx.borrow().clone();
    assert_eq!(after.latest, before);
    assert!(after.tracking);
    assert!(!after.loading);
}

#[tokio::test(start_paused = true)]
async fn successful_background_refresh_overwrites_with_fresh_timestamp() {
    let source = ScriptedSource::new(vec![
        Ok(CelestialCoordinates::test("Mars", 120.5, 45.2)),
        Ok(CelestialCoordinates::test("Mars", 121.0, 45.5)),
    ]);
    let (poller, rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.submit_search(mars_params()).await;
    let first_ts = match rx.borrow().latest.clone() {
        Some(LookupResult::Success { timestamp, .. }) => timestamp,
        other => panic!("expected success, got {other:?}"),
    };

    poller.toggle_tracking().await;
    sleep(Duration::from_millis(5_001)).await;

    let state = rx.borrow().clone();
    assert!(!state.loading);
    match state.latest {
        Some(LookupResult::Success { azimuth, timestamp, .. }) => {
            assert!((azimuth - 121.0).abs() < f64::EPSILON);
            assert!(timestamp >= first_ts);
        }
        other => panic!("expected refreshed success, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn manual_failure_surfaces_status_and_clears_previous_data() {
    let source = ScriptedSource::new(vec![mars_success(), Err(ResponseError::Status(500))]);
    let (poller, rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.submit_search(mars_params()).await;
    assert!(rx.borrow().latest.as_ref().is_some_and(LookupResult::is_success));

    poller.submit_search(mars_params()).await;
    match rx.borrow().latest.clone() {
        Some(LookupResult::Failure { error, raw_response }) => {
            assert!(error.contains("500"));
            assert!(raw_response.is_none());
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn application_error_preserves_raw_diagnostic_payload() {
    let source = ScriptedSource::new(vec![Err(ResponseError::Application(LookupErrorBody {
        error: String::from("Target ambiguous. Please try a more specific ID (e.g., '499' for Mars)."),
        raw_response: Some(String::from("Multiple major-bodies match string")),
    }))]);
    let (poller, rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.submit_search(mars_params()).await;
    match rx.borrow().latest.clone() {
        Some(LookupResult::Failure { error, raw_response }) => {
            assert!(error.starts_with("Target ambiguous"));
            assert_eq!(raw_response.as_deref(), Some("Multiple major-bodies match string"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn new_search_tears_down_old_refresh_loop() {
    let source = ScriptedSource::new(vec![]);
    let (poller, _rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.submit_search(mars_params()).await;
    poller.toggle_tracking().await;
    sleep(Duration::from_millis(5_001)).await;
    assert_eq!(source.call_count(), 2);

    let jupiter = SearchParams { target: String::from("599"), lat: 40.0, lon: -74.0 };
    poller.submit_search(jupiter.clone()).await;
    assert_eq!(source.call_count(), 3);
    assert_eq!(source.last_params(), Some(jupiter));

    // The old loop is gone and tracking is off: nothing fires at the old
    // interval target.
    sleep(Duration::from_millis(20_000)).await;
    assert_eq!(source.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn toggle_without_a_prior_search_is_a_no_op() {
    let source = ScriptedSource::new(vec![]);
    let (poller, rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.toggle_tracking().await;
    assert!(!rx.borrow().tracking);
    sleep(Duration::from_millis(20_000)).await;
    assert_eq!(source.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn shut_down_stops_the_refresh_loop() {
    let source = ScriptedSource::new(vec![]);
    let (poller, rx) = PositionPoller::new(Arc::clone(&source) as Arc<dyn CoordinateSource>);

    poller.submit_search(mars_params()).await;
    poller.toggle_tracking().await;
    poller.shut_down().await;
    assert!(!rx.borrow().tracking);

    sleep(Duration::from_millis(20_000)).await;
    assert_eq!(source.call_count(), 1);
}
