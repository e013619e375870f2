//! Domain types for the departure dashboard.
//!
//! These types are the normalized shapes the rest of the crate works with.
//! Raw API responses (with their inconsistent envelopes) live in
//! `crate::bart::types` and are converted at the client boundary.

mod analytics;
mod departure;
mod station;

pub use analytics::{DailyStats, DelayPattern, DestinationStats};
pub use departure::Departure;
pub use station::{InvalidStationCode, Station, StationCode};
