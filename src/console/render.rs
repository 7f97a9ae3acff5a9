use crate::tracking::{LookupResult, REFRESH_PERIOD, ViewState};
use crate::{catalog, error, info, log, trk};
use tokio::sync::watch;

/// Formats an angle in degrees for display, two decimals with a degree
/// suffix: `120.5` becomes `"120.50°"`.
pub fn format_angle(degrees: f64) -> String {
    format!("{degrees:.2}°")
}

/// Watches the poller's state channel and prints every transition: the
/// loading banner, acquired-target readouts, and error blocks. Runs until
/// the sending side is dropped.
pub async fn run_state_renderer(mut rx: watch::Receiver<ViewState>) {
    let mut last_rendered: Option<LookupResult> = None;
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if state.loading {
            info!("Aligning sensors...");
            last_rendered = None;
            continue;
        }
        // Flag-only transitions (tracking toggles) re-publish the same
        // result; skip re-printing those.
        if state.latest == last_rendered {
            continue;
        }
        if let Some(result) = &state.latest {
            render_result(result, state.tracking);
        }
        last_rendered = state.latest;
    }
}

fn render_result(result: &LookupResult, tracking: bool) {
    match result {
        LookupResult::Success { target, azimuth, altitude, timestamp } => {
            let body = catalog::resolve(target);
            trk!("Target Acquired: {} | ID: \"{}\"", body.name, body.id);
            log!("{}", body.description);
            trk!(
                "Azimuth: {}  Altitude: {}",
                format_angle(*azimuth),
                format_angle(*altitude)
            );
            log!("Observed at {} UTC", timestamp.format("%H:%M:%S"));
            if tracking {
                log!("Tracking active, next update in {}s", REFRESH_PERIOD.as_secs());
            }
        }
        LookupResult::Failure { error, raw_response } => {
            error!("Signal lost: {error}");
            if let Some(raw) = raw_response {
                log!("Raw backend response:\n{raw}");
            }
        }
    }
}
