#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod catalog;
mod console;
mod http_handler;
mod logger;
mod tracking;

use crate::http_handler::http_client::HTTPClient;
use crate::tracking::{CoordinateSource, LookupGateway, PositionPoller};
use std::{env, sync::Arc};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let base_url_var = env::var("TELESCOPIO_BASE_URL");
    let base_url = base_url_var.as_ref().map_or("http://localhost:8000", |v| v.as_str());

    info!("TELESCOPIO | Orbital Positioning System");
    log!("Lookup backend: {base_url}");

    let client = Arc::new(HTTPClient::new(base_url));
    let source: Arc<dyn CoordinateSource> = Arc::new(LookupGateway::new(client));
    let (poller, state_rx) = PositionPoller::new(source);
    let poller = Arc::new(poller);

    let renderer = tokio::spawn(console::run_state_renderer(state_rx));
    console::run(Arc::clone(&poller)).await;
    renderer.abort();

    info!("Console closed.");
}
