//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::services::ServeDir;

use crate::bart::BartError;
use crate::domain::StationCode;

use super::dto::{AnalyticsResponse, BoardResponse, ErrorResponse};
use super::state::AppState;
use super::templates::{AnalyticsPage, BoardPage, BoardView, HistoryView, station_options};

/// Default range for the historical analytics queries, in days.
const DEFAULT_ANALYTICS_DAYS: u32 = 7;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(board_page))
        .route("/select", get(select_live_station))
        .route("/analytics", get(analytics_page))
        .route("/analytics/select", get(select_analytics_station))
        .route("/api/board", get(board_json))
        .route("/api/analytics", get(analytics_json))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Station selection query.
#[derive(Debug, Deserialize)]
struct SelectRequest {
    station: String,
}

/// Day-range query for analytics.
#[derive(Debug, Deserialize)]
struct AnalyticsRequest {
    days: Option<u32>,
}

/// Live departures page.
async fn board_page(State(state): State<AppState>) -> BoardPage {
    let snapshot = state.live_board.snapshot().await;
    let stations = state.directory.all_sorted().await;

    let station_name = match snapshot.station {
        Some(code) => state.directory.get(&code).await.map(|s| s.name),
        None => None,
    };

    BoardPage {
        stations: station_options(&stations, snapshot.station),
        view: BoardView::from_snapshot(&snapshot, station_name.as_deref()),
    }
}

/// Switch the live view to another station.
async fn select_live_station(
    State(state): State<AppState>,
    Query(req): Query<SelectRequest>,
) -> Result<Redirect, AppError> {
    let code = parse_station(&req.station)?;
    state.live_board.select(code);
    Ok(Redirect::to("/"))
}

/// Delay analytics page: the relaxed poller's snapshot plus the
/// historical tables, fetched on demand.
async fn analytics_page(
    State(state): State<AppState>,
    Query(req): Query<AnalyticsRequest>,
) -> AnalyticsPage {
    let days = clamp_days(req.days);
    let snapshot = state.analytics_board.snapshot().await;
    let stations = state.directory.all_sorted().await;

    let station = match snapshot.station {
        Some(code) => state.directory.get(&code).await,
        None => None,
    };
    let station_name = station.as_ref().map(|s| s.name.clone());

    // A history failure is a banner, not a dead page: the live snapshot
    // section still renders.
    let history = match &station_name {
        Some(name) => {
            let fetched = futures::try_join!(
                state.client.daily_stats(days),
                state.client.delay_patterns(days),
                state.client.station_stats(name, days),
            );
            match fetched {
                Ok((daily, patterns, destinations)) => {
                    HistoryView::from_records(days, daily, patterns, destinations)
                }
                Err(e) => HistoryView::failed(days, e.to_string()),
            }
        }
        None => HistoryView::from_records(days, Vec::new(), Vec::new(), Vec::new()),
    };

    AnalyticsPage {
        stations: station_options(&stations, snapshot.station),
        view: BoardView::from_snapshot(&snapshot, station_name.as_deref()),
        history,
    }
}

/// Switch the analytics view to another station.
async fn select_analytics_station(
    State(state): State<AppState>,
    Query(req): Query<SelectRequest>,
) -> Result<Redirect, AppError> {
    let code = parse_station(&req.station)?;
    state.analytics_board.select(code);
    Ok(Redirect::to("/analytics"))
}

/// Current live snapshot plus aggregates as JSON.
async fn board_json(State(state): State<AppState>) -> Json<BoardResponse> {
    let snapshot = state.live_board.snapshot().await;
    Json(BoardResponse::from_snapshot(&snapshot))
}

/// Historical analytics bundle as JSON.
async fn analytics_json(
    State(state): State<AppState>,
    Query(req): Query<AnalyticsRequest>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let days = clamp_days(req.days);

    let (daily, patterns, destinations) = futures::try_join!(
        state.client.daily_stats(days),
        state.client.delay_patterns(days),
        state.client.all_station_stats(),
    )?;

    Ok(Json(AnalyticsResponse {
        days,
        daily,
        patterns,
        destinations,
    }))
}

fn parse_station(raw: &str) -> Result<StationCode, AppError> {
    StationCode::parse_normalized(raw).map_err(|_| AppError::BadRequest {
        message: format!("invalid station code: {}", raw),
    })
}

/// Clamp the day range to what the backend will answer for.
fn clamp_days(days: Option<u32>) -> u32 {
    days.unwrap_or(DEFAULT_ANALYTICS_DAYS).clamp(1, 30)
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug)]
enum AppError {
    /// The request itself was malformed
    BadRequest { message: String },

    /// The backend call behind the endpoint failed
    Upstream(BartError),
}

impl From<BartError> for AppError {
    fn from(err: BartError) -> Self {
        AppError::Upstream(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
