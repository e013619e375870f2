//! Askama templates and their view models.
//!
//! View models are fully pre-formatted strings and booleans so the
//! templates stay free of logic beyond loops and flags.

use askama::Template;

use crate::board::{BoardSnapshot, Phase};
use crate::domain::{DailyStats, DelayPattern, Departure, DestinationStats, Station, StationCode};

use super::dto::{CountRow, DirectionRow};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Live departures page.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardPage {
    pub stations: Vec<StationOption>,
    pub view: BoardView,
}

/// Delay analytics page.
#[derive(Template)]
#[template(path = "analytics.html")]
pub struct AnalyticsPage {
    pub stations: Vec<StationOption>,
    pub view: BoardView,
    pub history: HistoryView,
}

// ============================================================================
// View Models
// ============================================================================

/// One entry in the station selector.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub code: String,
    pub name: String,
    pub selected: bool,
}

/// Board state, pre-formatted for rendering.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub station_label: String,
    pub failed: bool,
    pub error: String,
    pub last_updated: String,
    pub show_loading: bool,
    pub show_empty_notice: bool,
    pub has_rows: bool,
    pub rows: Vec<DepartureRowView>,
    pub summary: SummaryView,
}

/// One departure table row.
#[derive(Debug, Clone)]
pub struct DepartureRowView {
    pub destination: String,
    pub direction: String,
    pub minutes: u32,
    pub platform: String,
    pub bikes: &'static str,
    pub line: String,
    pub cars: u32,
    pub delayed: bool,
    pub delay_label: String,
    pub observed_at: String,
}

/// Pre-formatted aggregates for the chart tables.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub total: usize,
    pub average_delay: String,
    pub max_delay: String,
    pub by_destination: Vec<CountRow>,
    pub by_platform: Vec<CountRow>,
    pub direction_by_platform: Vec<DirectionRow>,
    pub countdown: Vec<CountRow>,
}

/// Historical analytics tables for the analytics page.
#[derive(Debug, Clone)]
pub struct HistoryView {
    pub days: u32,
    pub failed: bool,
    pub error: String,
    pub daily: Vec<DailyRow>,
    pub patterns: Vec<PatternRow>,
    pub destinations: Vec<DestinationRow>,
}

#[derive(Debug, Clone)]
pub struct DailyRow {
    pub date: String,
    pub station: String,
    pub departures: u64,
    pub delays: u64,
    pub avg_delay: String,
}

#[derive(Debug, Clone)]
pub struct PatternRow {
    pub date: String,
    pub hour: String,
    pub station: String,
    pub avg_delay: String,
    pub trains: u64,
}

#[derive(Debug, Clone)]
pub struct DestinationRow {
    pub destination: String,
    pub departures: u64,
    pub avg_delay: String,
    pub delays: u64,
}

// ============================================================================
// Construction
// ============================================================================

/// Build the selector entries, marking the current selection.
pub fn station_options(stations: &[Station], selected: Option<StationCode>) -> Vec<StationOption> {
    stations
        .iter()
        .map(|station| StationOption {
            code: station.code.to_string(),
            name: station.name.clone(),
            selected: Some(station.code) == selected,
        })
        .collect()
}

impl BoardView {
    /// Build from a snapshot plus the selected station's display name.
    pub fn from_snapshot(snapshot: &BoardSnapshot, station_name: Option<&str>) -> Self {
        let station_label = match (snapshot.station, station_name) {
            (Some(code), Some(name)) => format!("{} ({})", name, code),
            (Some(code), None) => code.to_string(),
            (None, _) => "No station selected".to_string(),
        };

        let loading = snapshot.phase == Phase::Loading;
        let failed = snapshot.phase == Phase::Failed;
        let has_rows = !snapshot.departures.is_empty();

        Self {
            station_label,
            failed,
            error: snapshot.error.clone().unwrap_or_default(),
            last_updated: snapshot
                .last_updated
                .map(|t| t.format("%H:%M:%S UTC").to_string())
                .unwrap_or_default(),
            show_loading: loading && !has_rows,
            show_empty_notice: snapshot.phase == Phase::Ready && !has_rows,
            has_rows,
            rows: snapshot
                .departures
                .iter()
                .map(DepartureRowView::from_departure)
                .collect(),
            summary: SummaryView::from_departures(&snapshot.departures),
        }
    }
}

impl DepartureRowView {
    /// Build one table row.
    pub fn from_departure(departure: &Departure) -> Self {
        let delayed = departure.is_delayed();
        Self {
            destination: departure.destination.clone(),
            direction: departure.direction.clone(),
            minutes: departure.minutes,
            platform: departure.platform.clone(),
            bikes: if departure.bike_flag { "Yes" } else { "No" },
            line: departure.color.clone(),
            cars: departure.length,
            delayed,
            delay_label: if delayed {
                format!("{} min late", departure.delay)
            } else {
                "On time".to_string()
            },
            observed_at: departure
                .timestamp
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

impl SummaryView {
    /// Derive and format the chart datasets.
    pub fn from_departures(departures: &[Departure]) -> Self {
        let summary = super::dto::BoardSummary::from_departures(departures);
        Self {
            total: summary.total,
            average_delay: format!("{:.1}", summary.average_delay),
            max_delay: format!("{:.1}", summary.max_delay),
            by_destination: summary.by_destination,
            by_platform: summary.by_platform,
            direction_by_platform: summary.direction_by_platform,
            countdown: summary.countdown,
        }
    }
}

impl HistoryView {
    /// Build from successfully fetched analytics records.
    pub fn from_records(
        days: u32,
        daily: Vec<DailyStats>,
        patterns: Vec<DelayPattern>,
        destinations: Vec<DestinationStats>,
    ) -> Self {
        Self {
            days,
            failed: false,
            error: String::new(),
            daily: daily.iter().map(DailyRow::from_stats).collect(),
            patterns: patterns.iter().map(PatternRow::from_pattern).collect(),
            destinations: destinations
                .iter()
                .map(DestinationRow::from_stats)
                .collect(),
        }
    }

    /// Build the failure state: the page renders a banner and no tables.
    pub fn failed(days: u32, error: String) -> Self {
        Self {
            days,
            failed: true,
            error,
            daily: Vec::new(),
            patterns: Vec::new(),
            destinations: Vec::new(),
        }
    }
}

impl DailyRow {
    fn from_stats(stats: &DailyStats) -> Self {
        Self {
            date: stats.date.format("%Y-%m-%d").to_string(),
            station: stats.station.clone(),
            departures: stats.total_departures,
            delays: stats.total_delays,
            avg_delay: format_avg(stats.avg_delay_minutes),
        }
    }
}

impl PatternRow {
    fn from_pattern(pattern: &DelayPattern) -> Self {
        Self {
            date: pattern.date.format("%Y-%m-%d").to_string(),
            hour: format!("{:02}:00", pattern.hour),
            station: pattern.station.clone(),
            avg_delay: format!("{:.1}", pattern.avg_delay),
            trains: pattern.total_trains,
        }
    }
}

impl DestinationRow {
    fn from_stats(stats: &DestinationStats) -> Self {
        Self {
            destination: stats.destination.clone(),
            departures: stats.total_departures,
            avg_delay: format_avg(stats.avg_delay_minutes),
            delays: stats.delay_count,
        }
    }
}

/// Formatted average, or "-" when the range had no delayed trains.
fn format_avg(avg: Option<f64>) -> String {
    match avg {
        Some(value) => format!("{:.1}", value),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departure(destination: &str, minutes: u32, delay: f64) -> Departure {
        Departure {
            destination: destination.into(),
            direction: "North".into(),
            minutes,
            platform: "1".into(),
            bike_flag: true,
            delay,
            color: "ORANGE".into(),
            length: 10,
            timestamp: Some("2025-08-01T17:45:00Z".parse().unwrap()),
        }
    }

    fn ready_snapshot() -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::idle();
        snapshot.begin_loading(StationCode::parse("MCAR").unwrap());
        snapshot.apply_success(
            vec![departure("Richmond", 4, 5.0), departure("Millbrae", 9, 0.0)],
            "2025-08-01T17:46:00Z".parse().unwrap(),
        );
        snapshot
    }

    #[test]
    fn board_view_labels() {
        let view = BoardView::from_snapshot(&ready_snapshot(), Some("MacArthur"));

        assert_eq!(view.station_label, "MacArthur (MCAR)");
        assert!(!view.failed);
        assert!(view.has_rows);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].delay_label, "5 min late");
        assert_eq!(view.rows[1].delay_label, "On time");
        assert_eq!(view.last_updated, "17:46:00 UTC");
    }

    #[test]
    fn idle_view_has_placeholder_label() {
        let view = BoardView::from_snapshot(&BoardSnapshot::idle(), None);
        assert_eq!(view.station_label, "No station selected");
        assert!(!view.show_loading);
        assert!(!view.show_empty_notice);
    }

    #[test]
    fn failed_view_keeps_rows_and_error() {
        let mut snapshot = ready_snapshot();
        snapshot.begin_loading(StationCode::parse("MCAR").unwrap());
        snapshot.apply_failure("API error 500: boom".into());

        let view = BoardView::from_snapshot(&snapshot, Some("MacArthur"));
        assert!(view.failed);
        assert_eq!(view.error, "API error 500: boom");
        assert!(view.has_rows, "stale rows stay visible behind the banner");
    }

    #[test]
    fn station_options_mark_selection() {
        let stations = vec![
            Station::new(StationCode::parse("12TH").unwrap(), "12th St."),
            Station::new(StationCode::parse("MCAR").unwrap(), "MacArthur"),
        ];
        let options = station_options(&stations, StationCode::parse("MCAR").ok());

        assert!(!options[0].selected);
        assert!(options[1].selected);
    }

    #[test]
    fn board_page_renders() {
        let stations = vec![Station::new(StationCode::parse("MCAR").unwrap(), "MacArthur")];
        let page = BoardPage {
            stations: station_options(&stations, StationCode::parse("MCAR").ok()),
            view: BoardView::from_snapshot(&ready_snapshot(), Some("MacArthur")),
        };

        let html = page.render().unwrap();
        assert!(html.contains("MacArthur (MCAR)"));
        assert!(html.contains("Richmond"));
        assert!(html.contains("5 min late"));
    }

    #[test]
    fn analytics_page_renders_failure_banner() {
        let page = AnalyticsPage {
            stations: Vec::new(),
            view: BoardView::from_snapshot(&BoardSnapshot::idle(), None),
            history: HistoryView::failed(7, "API error 502: bad gateway".into()),
        };

        let html = page.render().unwrap();
        assert!(html.contains("API error 502"));
    }

    #[test]
    fn history_rows_format_missing_averages() {
        let daily = vec![DailyStats {
            date: "2025-08-01".parse().unwrap(),
            station: "MCAR".into(),
            total_departures: 100,
            total_delays: 0,
            avg_delay_minutes: None,
        }];
        let view = HistoryView::from_records(7, daily, Vec::new(), Vec::new());
        assert_eq!(view.daily[0].avg_delay, "-");
        assert!(!view.failed);
    }
}
