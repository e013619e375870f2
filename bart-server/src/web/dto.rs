//! Serializable views of board and analytics state for the JSON API.

use serde::Serialize;

use crate::board::BoardSnapshot;
use crate::domain::{DailyStats, DelayPattern, Departure, DestinationStats};
use crate::stats;

/// Current board state plus derived aggregates.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Selected station code, if any
    pub station: Option<String>,

    /// Refresh phase: idle, loading, ready, or failed
    pub phase: &'static str,

    /// Error message when the last refresh failed
    pub error: Option<String>,

    /// When the data was last successfully refreshed (RFC 3339)
    pub last_updated: Option<String>,

    /// The departure snapshot
    pub departures: Vec<DepartureRow>,

    /// Aggregates derived from the snapshot
    pub summary: BoardSummary,
}

/// One departure in API responses.
#[derive(Debug, Serialize)]
pub struct DepartureRow {
    pub destination: String,
    pub direction: String,
    pub minutes: u32,
    pub platform: String,
    pub bikes_allowed: bool,
    pub delay: f64,
    pub line: String,
    pub cars: u32,
    pub observed_at: Option<String>,
}

/// A labeled count (one chart bar or pie slice).
#[derive(Debug, Clone, Serialize)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
}

/// North/south counts for one platform.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionRow {
    pub platform: String,
    pub north: usize,
    pub south: usize,
}

/// Chart-ready aggregates over one snapshot.
#[derive(Debug, Serialize)]
pub struct BoardSummary {
    pub total: usize,
    pub average_delay: f64,
    pub max_delay: f64,
    /// Busiest destinations first
    pub by_destination: Vec<CountRow>,
    pub by_platform: Vec<CountRow>,
    pub direction_by_platform: Vec<DirectionRow>,
    /// Ascending countdown order
    pub countdown: Vec<CountRow>,
}

/// Historical analytics bundle.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub days: u32,
    pub daily: Vec<DailyStats>,
    pub patterns: Vec<DelayPattern>,
    pub destinations: Vec<DestinationStats>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl BoardResponse {
    /// Build from a board snapshot.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            station: snapshot.station.map(|code| code.to_string()),
            phase: snapshot.phase.as_str(),
            error: snapshot.error.clone(),
            last_updated: snapshot.last_updated.map(|t| t.to_rfc3339()),
            departures: snapshot
                .departures
                .iter()
                .map(DepartureRow::from_departure)
                .collect(),
            summary: BoardSummary::from_departures(&snapshot.departures),
        }
    }
}

impl DepartureRow {
    /// Build from a domain departure.
    pub fn from_departure(departure: &Departure) -> Self {
        Self {
            destination: departure.destination.clone(),
            direction: departure.direction.clone(),
            minutes: departure.minutes,
            platform: departure.platform.clone(),
            bikes_allowed: departure.bike_flag,
            delay: departure.delay,
            line: departure.color.clone(),
            cars: departure.length,
            observed_at: departure.timestamp.map(|t| t.to_rfc3339()),
        }
    }
}

impl BoardSummary {
    /// Derive all chart datasets from a snapshot.
    ///
    /// HashMap-backed aggregates are sorted here so responses are stable
    /// across refreshes.
    pub fn from_departures(departures: &[Departure]) -> Self {
        let mut by_destination: Vec<CountRow> = stats::count_by_destination(departures)
            .into_iter()
            .map(|(label, count)| CountRow { label, count })
            .collect();
        by_destination.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

        let mut by_platform: Vec<CountRow> = stats::count_by_platform(departures)
            .into_iter()
            .map(|(label, count)| CountRow { label, count })
            .collect();
        by_platform.sort_by(|a, b| a.label.cmp(&b.label));

        let mut direction_by_platform: Vec<DirectionRow> =
            stats::direction_split_by_platform(departures)
                .into_iter()
                .map(|(platform, split)| DirectionRow {
                    platform,
                    north: split.north,
                    south: split.south,
                })
                .collect();
        direction_by_platform.sort_by(|a, b| a.platform.cmp(&b.platform));

        let countdown = stats::countdown_histogram(departures)
            .into_iter()
            .map(|bucket| CountRow {
                label: bucket.label,
                count: bucket.count,
            })
            .collect();

        Self {
            total: departures.len(),
            average_delay: stats::average_delay(departures),
            max_delay: stats::max_delay(departures),
            by_destination,
            by_platform,
            direction_by_platform,
            countdown,
        }
    }
}
