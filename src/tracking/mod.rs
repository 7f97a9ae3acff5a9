//! The position tracking core: owns the current search target and observer
//! location, issues lookups on submission and drives the optional fixed-rate
//! background refresh while tracking mode is on.

mod poller;
mod source;

pub use poller::{PositionPoller, REFRESH_PERIOD};
pub use source::{CoordinateSource, LookupGateway};

use chrono::{DateTime, Utc};
use strum_macros::Display;

/// A submitted search. Immutable once stored; replaced wholesale by the next
/// submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub target: String,
    pub lat: f64,
    pub lon: f64,
}

/// Outcome of the most recent completed lookup. Single current-value
/// semantics: each new outcome replaces the previous one, no history.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Success {
        target: String,
        azimuth: f64,
        altitude: f64,
        /// Response arrival time, not observation time.
        timestamp: DateTime<Utc>,
    },
    Failure {
        error: String,
        raw_response: Option<String>,
    },
}

impl LookupResult {
    pub fn is_success(&self) -> bool { matches!(self, LookupResult::Success { .. }) }
}

/// Snapshot of everything the front end renders, published over a watch
/// channel. `loading` reflects manual searches only.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub params: Option<SearchParams>,
    pub tracking: bool,
    pub loading: bool,
    pub latest: Option<LookupResult>,
}

/// What happens to a lookup error raised by the background refresh loop.
///
/// Manual searches surface every failure; background refreshes swallow them
/// and keep the previous readout on screen. The asymmetry is inherited
/// product behavior, kept as an explicit named policy instead of being
/// unified with the manual path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum BackgroundRefreshErrorPolicy {
    /// Discard the error, leave displayed state untouched, keep polling.
    Suppress,
}

pub const BACKGROUND_REFRESH_ERROR_POLICY: BackgroundRefreshErrorPolicy =
    BackgroundRefreshErrorPolicy::Suppress;

#[cfg(test)]
mod tests;
