//! Historical analytics records.
//!
//! These mirror the rows the analytics endpoints aggregate server-side, so
//! they deserialize straight from the wire; there is no separate DTO layer
//! for them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-day, per-station departure and delay totals.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub station: String,
    pub total_departures: u64,
    pub total_delays: u64,
    /// Mean delay in minutes over delayed departures only. Absent when the
    /// day had no delays.
    pub avg_delay_minutes: Option<f64>,
}

/// Per-hour delay pattern for one station on one day.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DelayPattern {
    pub date: NaiveDate,
    pub hour: u8,
    pub station: String,
    pub avg_delay: f64,
    pub total_trains: u64,
}

/// Per-destination totals for one station over a day range.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DestinationStats {
    pub destination: String,
    pub total_departures: u64,
    /// Mean delay in minutes over delayed departures only.
    pub avg_delay_minutes: Option<f64>,
    pub delay_count: u64,
}
