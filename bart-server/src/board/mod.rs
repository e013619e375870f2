//! Live departure board with timer-driven refresh.
//!
//! Each active view owns one [`DepartureBoard`]: a background task that
//! re-fetches the selected station's departures on a fixed interval and on
//! selection change, exposing the result as a cloneable snapshot. The
//! state machine itself lives in [`snapshot`] and is testable without a
//! timer or a network.

mod poller;
mod snapshot;

pub use poller::{DepartureBoard, PollConfig};
pub use snapshot::{BoardSnapshot, Phase};
