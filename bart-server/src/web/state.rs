//! Application state for the web layer.

use std::sync::Arc;

use crate::bart::BartClient;
use crate::board::DepartureBoard;
use crate::stations::StationDirectory;

/// Shared application state.
///
/// The two boards are the two views the dashboard serves; each owns its
/// own selection and timer.
#[derive(Clone)]
pub struct AppState {
    /// Backend API client (used directly for the analytics endpoints)
    pub client: Arc<BartClient>,

    /// Station directory, refreshed in the background
    pub directory: StationDirectory<BartClient>,

    /// Poller behind the live departures view
    pub live_board: Arc<DepartureBoard>,

    /// Poller behind the delay-analytics view
    pub analytics_board: Arc<DepartureBoard>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        client: Arc<BartClient>,
        directory: StationDirectory<BartClient>,
        live_board: Arc<DepartureBoard>,
        analytics_board: Arc<DepartureBoard>,
    ) -> Self {
        Self {
            client,
            directory,
            live_board,
            analytics_board,
        }
    }
}
