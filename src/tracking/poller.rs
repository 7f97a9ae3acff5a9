use super::{
    BACKGROUND_REFRESH_ERROR_POLICY, BackgroundRefreshErrorPolicy, CoordinateSource, LookupResult,
    SearchParams, ViewState,
};
use crate::event;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Fixed period of the background refresh loop.
pub const REFRESH_PERIOD: Duration = Duration::from_millis(5000);

/// Owns the refresh loop for exactly one tracking session. Dropping the
/// handle cancels the token and aborts the task, so every path that replaces
/// or discards it (new search, tracking off, poller teardown) kills the loop
/// deterministically.
struct RefreshHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Owns the current search target and the latest lookup outcome, publishing
/// every state transition over a watch channel for the front end to render.
///
/// Invariants:
/// - At most one refresh task exists, always derived from the current
///   [`SearchParams`].
/// - Submitting a search forces tracking off before anything else.
/// - `loading` is touched by manual searches only.
pub struct PositionPoller {
    source: Arc<dyn CoordinateSource>,
    state_tx: watch::Sender<ViewState>,
    refresh: Mutex<Option<RefreshHandle>>,
}

impl PositionPoller {
    /// Creates the poller and the receiving end of its state channel.
    pub fn new(source: Arc<dyn CoordinateSource>) -> (Self, watch::Receiver<ViewState>) {
        let (tx, rx) = watch::channel(ViewState::default());
        (Self { source, state_tx: tx, refresh: Mutex::new(None) }, rx)
    }

    /// A fresh subscription to the state channel.
    pub fn state(&self) -> watch::Receiver<ViewState> { self.state_tx.subscribe() }

    /// Submits a new search: tears down any running refresh loop, clears the
    /// previous result, stores the new params and issues exactly one lookup.
    /// Failures are surfaced in full, raw diagnostic payload included. No
    /// retries; the user resubmits.
    pub async fn submit_search(&self, params: SearchParams) {
        self.refresh.lock().await.take();
        self.state_tx.send_modify(|s| {
            s.loading = true;
            s.latest = None;
            s.tracking = false;
            s.params = Some(params.clone());
        });

        let result = match self.source.lookup(&params).await {
            Ok(coords) => LookupResult::Success {
                target: String::from(coords.target()),
                azimuth: coords.azimuth(),
                altitude: coords.altitude(),
                timestamp: Utc::now(),
            },
            Err(e) => LookupResult::Failure {
                error: e.to_string(),
                raw_response: e.raw_response().map(String::from),
            },
        };

        self.state_tx.send_modify(|s| {
            s.loading = false;
            s.latest = Some(result);
        });
    }

    /// Flips tracking mode. A no-op until a first search has stored params;
    /// the console only offers the control after a result or error exists.
    pub async fn toggle_tracking(&self) {
        let params = self.state_tx.borrow().params.clone();
        let Some(params) = params else { return };

        let mut guard = self.refresh.lock().await;
        if guard.take().is_some() {
            self.state_tx.send_modify(|s| s.tracking = false);
        } else {
            *guard = Some(self.spawn_refresh(params));
            self.state_tx.send_modify(|s| s.tracking = true);
        }
    }

    /// Tears down the refresh loop, if any. Called on console exit.
    pub async fn shut_down(&self) {
        self.refresh.lock().await.take();
        self.state_tx.send_modify(|s| s.tracking = false);
    }

    fn spawn_refresh(&self, params: SearchParams) -> RefreshHandle {
        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();
        let source = Arc::clone(&self.source);
        let state_tx = self.state_tx.clone();

        let task = tokio::spawn(async move {
            let mut tick = interval(REFRESH_PERIOD);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick resolves immediately; consume it so the
            // first refresh lands one full period after tracking is enabled.
            tick.tick().await;
            loop {
                tokio::select! {
                    () = loop_cancel.cancelled() => break,
                    _ = tick.tick() => {}
                }
                match source.lookup(&params).await {
                    Ok(coords) => {
                        state_tx.send_modify(|s| {
                            s.latest = Some(LookupResult::Success {
                                target: String::from(coords.target()),
                                azimuth: coords.azimuth(),
                                altitude: coords.altitude(),
                                timestamp: Utc::now(),
                            });
                        });
                    }
                    Err(e) => match BACKGROUND_REFRESH_ERROR_POLICY {
                        BackgroundRefreshErrorPolicy::Suppress => {
                            event!("Background refresh for {} failed: {e}", params.target);
                        }
                    },
                }
            }
        });

        RefreshHandle { cancel, task }
    }
}
