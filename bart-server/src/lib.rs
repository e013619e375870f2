//! Live departure dashboard for the BART network.
//!
//! Polls a backend for station directories and departure snapshots,
//! derives chart-ready aggregates from each snapshot, and serves the
//! result as a small web dashboard.

pub mod bart;
pub mod board;
pub mod domain;
pub mod stations;
pub mod stats;
pub mod web;
