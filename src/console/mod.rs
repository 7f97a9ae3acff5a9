//! Interactive terminal front end: parses user commands from stdin and
//! renders poller state transitions. The Rust-native stand-in for the
//! original browser UI's event loop.

mod command;
mod render;

pub use command::{Command, ParseError};
pub use render::run_state_renderer;

use crate::tracking::PositionPoller;
use crate::{catalog, error, info, log, warn};
use chrono::Utc;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads console commands line by line and drives the poller until the user
/// exits or stdin closes. Tears the poller down on the way out.
pub async fn run(poller: Arc<PositionPoller>) {
    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if !dispatch(&poller, &line).await {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read console input: {e}");
                break;
            }
        }
    }

    poller.shut_down().await;
}

/// Handles one input line. Returns `false` when the console should close.
async fn dispatch(poller: &PositionPoller, line: &str) -> bool {
    match command::parse(line) {
        Ok(Command::Search(params)) => {
            poller.submit_search(params).await;
        }
        Ok(Command::Track) => {
            let state = poller.state().borrow().clone();
            if state.params.is_none() {
                warn!("No target locked yet. Run a search first.");
            } else {
                poller.toggle_tracking().await;
                if poller.state().borrow().tracking {
                    info!("Tracking enabled.");
                } else {
                    info!("Tracking disabled.");
                }
            }
        }
        Ok(Command::Status) => print_status(poller),
        Ok(Command::Catalog(term)) => print_catalog(term.as_deref().unwrap_or("")),
        Ok(Command::Help) => print_help(),
        Ok(Command::Exit) => return false,
        Err(ParseError::Empty) => {}
        Err(e) => warn!("{e}"),
    }
    true
}

fn print_status(poller: &PositionPoller) {
    let state = poller.state().borrow().clone();
    log!("Console time: {} UTC", Utc::now().format("%H:%M:%S"));
    match &state.params {
        Some(params) => {
            log!(
                "Target: {} | Observer: lat {}, lon {}",
                params.target, params.lat, params.lon
            );
            log!("Tracking: {}", if state.tracking { "on" } else { "off" });
            if let Some(latest) = &state.latest {
                log!("Last lookup: {}", if latest.is_success() { "success" } else { "failed" });
            }
        }
        None => log!("No search submitted yet."),
    }
}

fn print_catalog(term: &str) {
    let matches = catalog::search(term);
    if matches.is_empty() {
        log!("No celestial objects found matching query.");
        return;
    }
    for body in &matches {
        log!("{:>9}  {:<8} [{}] {}", body.id, body.name, body.kind, body.description);
    }
    log!("{} objects detected in sector.", matches.len());
}

fn print_help() {
    log!("Commands:");
    log!("  search <target> <lat> <lon>  look up a body's azimuth/altitude");
    log!("  track                        toggle a 5s auto-refresh of the last search");
    log!("  status                       show current target and tracking state");
    log!("  catalog [term]               list known celestial bodies");
    log!("  help                         show this message");
    log!("  exit                         leave the console");
}
