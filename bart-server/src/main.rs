use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bart_server::bart::{BartClient, BartConfig};
use bart_server::board::{DepartureBoard, PollConfig};
use bart_server::stations::StationDirectory;
use bart_server::web::{AppState, create_router};

/// How often to refresh the station directory (24 hours).
const STATION_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BartConfig::from_env();
    info!(base_url = %config.base_url, "starting departure dashboard");

    let client = Arc::new(BartClient::new(config).expect("failed to build HTTP client"));

    // Fetch the station directory up front (fail fast if unavailable)
    let directory = StationDirectory::fetch(Arc::clone(&client))
        .await
        .expect("failed to fetch station directory");
    info!(count = directory.len().await, "loaded station directory");

    // Refresh the directory daily in the background
    let directory_refresh = directory.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATION_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            if let Err(e) = directory_refresh.refresh().await {
                error!(error = %e, "station directory refresh failed");
            }
        }
    });

    // One poller per view: the live board refreshes every 30 seconds, the
    // analytics board every 2 minutes.
    let live_board = Arc::new(DepartureBoard::spawn(Arc::clone(&client), PollConfig::live()));
    let analytics_board = Arc::new(DepartureBoard::spawn(
        Arc::clone(&client),
        PollConfig::relaxed(),
    ));

    // Both views start on the first station in the directory
    if let Some(first) = directory.first().await {
        info!(station = %first.code, "selecting initial station");
        live_board.select(first.code);
        analytics_board.select(first.code);
    }

    let state = AppState::new(client, directory, live_board, analytics_board);

    let static_dir =
        std::env::var("STATIC_DIR").unwrap_or_else(|_| "bart-server/static".to_string());
    let app = create_router(state, &static_dir);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
