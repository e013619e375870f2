//! Timer-driven refresh task behind a departure board.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::bart::BoardSource;
use crate::domain::StationCode;

use super::snapshot::BoardSnapshot;

/// Refresh interval for live departure views.
const LIVE_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Refresh interval for views where staleness matters less.
const RELAXED_POLL_INTERVAL: Duration = Duration::from_secs(120);

/// Polling configuration for one view.
///
/// The interval is fixed per view; it is not user-adjustable at runtime.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
}

impl PollConfig {
    /// The 30-second cadence used by live departure views.
    pub fn live() -> Self {
        Self {
            interval: LIVE_POLL_INTERVAL,
        }
    }

    /// The 120-second cadence used by the analytics view.
    pub fn relaxed() -> Self {
        Self {
            interval: RELAXED_POLL_INTERVAL,
        }
    }

    /// A custom interval (for tests).
    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::live()
    }
}

/// Handle to one polling departure board.
///
/// `spawn` acquires the timer task; dropping the handle aborts it, so the
/// timer is released exactly once on every teardown path, panics and early
/// returns included.
pub struct DepartureBoard {
    shared: Arc<RwLock<BoardSnapshot>>,
    selection: watch::Sender<Option<StationCode>>,
    task: JoinHandle<()>,
}

impl DepartureBoard {
    /// Start the refresh task for one view.
    ///
    /// The board is `Idle` until the first [`select`](Self::select).
    pub fn spawn<S: BoardSource>(source: Arc<S>, config: PollConfig) -> Self {
        let shared = Arc::new(RwLock::new(BoardSnapshot::idle()));
        let (selection_tx, selection_rx) = watch::channel(None);

        let task = tokio::spawn(run_poll_loop(
            source,
            config,
            Arc::clone(&shared),
            selection_rx,
        ));

        Self {
            shared,
            selection: selection_tx,
            task,
        }
    }

    /// Change the selected station.
    ///
    /// Abandons the pending timer cycle and refreshes immediately.
    /// Re-selecting the current station forces a refresh too.
    pub fn select(&self, station: StationCode) {
        let _ = self.selection.send(Some(station));
    }

    /// The currently selected station, if any.
    pub fn selected(&self) -> Option<StationCode> {
        *self.selection.borrow()
    }

    /// A copy of the current board state.
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.shared.read().await.clone()
    }
}

impl Drop for DepartureBoard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// One view's refresh loop.
///
/// Cycles are strictly serial: a cycle awaits its fetch before the next
/// transition, so there is never more than one request in flight per view.
/// A response that lands after the selection moved on is discarded rather
/// than applied, which keeps the board last-requested-wins.
async fn run_poll_loop<S: BoardSource>(
    source: Arc<S>,
    config: PollConfig,
    shared: Arc<RwLock<BoardSnapshot>>,
    mut selection: watch::Receiver<Option<StationCode>>,
) {
    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            changed = selection.changed() => {
                if changed.is_err() {
                    // Handle dropped; nothing left to poll for.
                    break;
                }
                interval.reset();
            }
            _ = interval.tick() => {}
        }

        let station = { *selection.borrow_and_update() };
        let Some(station) = station else { continue };

        shared.write().await.begin_loading(station);

        let result = source.departures(station).await;

        if *selection.borrow() != Some(station) {
            info!(station = %station, "discarding response for superseded selection");
            continue;
        }

        let mut snapshot = shared.write().await;
        match result {
            Ok(departures) => {
                info!(station = %station, count = departures.len(), "board refreshed");
                snapshot.apply_success(departures, Utc::now());
            }
            Err(e) => {
                warn!(station = %station, error = %e, "board refresh failed");
                snapshot.apply_failure(e.to_string());
            }
        }
    }
}
