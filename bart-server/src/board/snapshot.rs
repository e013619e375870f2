//! Board state machine.

use chrono::{DateTime, Utc};

use crate::domain::{Departure, StationCode};

/// Where a board is in its refresh cycle.
///
/// `Ready` and `Failed` transition back to `Loading` on the next timer
/// fire or selection change; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No station selected yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed; previous data is retained.
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        }
    }
}

/// The current state of one departure board view.
///
/// The departure list always belongs to `station`: selecting a different
/// station clears it immediately, so a view can never render one station's
/// trains under another's name. A failed refresh keeps the previous list
/// and gates it behind `error` instead of clearing it.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub phase: Phase,
    pub station: Option<StationCode>,
    pub departures: Vec<Departure>,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl BoardSnapshot {
    /// The state before any station is selected.
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            station: None,
            departures: Vec::new(),
            error: None,
            last_updated: None,
        }
    }

    /// Enter `Loading` for a station.
    ///
    /// A same-station reload keeps the current list visible while the
    /// fetch runs; switching stations invalidates it.
    pub fn begin_loading(&mut self, station: StationCode) {
        if self.station != Some(station) {
            self.station = Some(station);
            self.departures.clear();
            self.error = None;
            self.last_updated = None;
        }
        self.phase = Phase::Loading;
    }

    /// Apply a successful fetch: replace the snapshot wholesale.
    pub fn apply_success(&mut self, departures: Vec<Departure>, at: DateTime<Utc>) {
        self.phase = Phase::Ready;
        self.departures = departures;
        self.error = None;
        self.last_updated = Some(at);
    }

    /// Apply a failed fetch: keep whatever was last shown, raise the flag.
    pub fn apply_failure(&mut self, error: String) {
        self.phase = Phase::Failed;
        self.error = Some(error);
    }
}
