//! Departure records.

use chrono::{DateTime, Utc};

/// A single upcoming train at a station.
///
/// Departure lists are replaced wholesale on every poll; there is no stable
/// identity for a departure across polls, so this type carries no id.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// Terminal station the train is headed to, e.g. "Richmond".
    pub destination: String,

    /// Free-text direction, e.g. "North" or "Southbound".
    pub direction: String,

    /// Countdown until the train leaves, in minutes.
    pub minutes: u32,

    /// Platform the train departs from.
    pub platform: String,

    /// Whether bikes are allowed on this train.
    pub bike_flag: bool,

    /// Minutes late. Zero means on time.
    pub delay: f64,

    /// Line identifier, e.g. "YELLOW".
    pub color: String,

    /// Number of cars.
    pub length: u32,

    /// When this record was observed, if the backend reports it.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Departure {
    /// Whether this departure is running late.
    pub fn is_delayed(&self) -> bool {
        self.delay > 0.0
    }
}
