//! BART backend API client.
//!
//! Wraps the dashboard backend's HTTP surface: the station directory, live
//! departure snapshots, and the historical analytics endpoints. Response
//! envelopes vary between backend revisions; this module normalizes them so
//! callers only ever see domain types.

mod client;
mod error;
mod mock;
mod source;
pub mod types;

pub use client::{BartClient, BartConfig};
pub use error::BartError;
pub use mock::MockBartClient;
pub use source::BoardSource;
