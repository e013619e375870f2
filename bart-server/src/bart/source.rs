//! The seam between data consumers and the backend.

use futures::future::BoxFuture;

use crate::domain::{Departure, Station, StationCode};

use super::client::BartClient;
use super::error::BartError;

/// Something a departure board can poll.
///
/// Implemented by the real HTTP client and by [`super::MockBartClient`], so
/// the polling controller and station directory are testable without a
/// network. Boxed futures keep the trait object-safe enough to hand to a
/// spawned task without naming concrete future types.
pub trait BoardSource: Send + Sync + 'static {
    /// Fetch the station directory.
    fn stations(&self) -> BoxFuture<'_, Result<Vec<Station>, BartError>>;

    /// Fetch the departure snapshot for one station.
    fn departures(&self, station: StationCode)
    -> BoxFuture<'_, Result<Vec<Departure>, BartError>>;
}

impl BoardSource for BartClient {
    fn stations(&self) -> BoxFuture<'_, Result<Vec<Station>, BartError>> {
        Box::pin(self.list_stations())
    }

    fn departures(
        &self,
        station: StationCode,
    ) -> BoxFuture<'_, Result<Vec<Departure>, BartError>> {
        Box::pin(async move { self.list_departures(&station).await })
    }
}
