//! Station directory.
//!
//! A thread-safe, wholesale-replaced copy of the backend's station list.
//! Fetched once at startup and refreshed in the background; a failed
//! refresh keeps the existing directory.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::bart::{BartError, BoardSource};
use crate::domain::{Station, StationCode};

/// Thread-safe station lookup and listing.
#[derive(Clone)]
pub struct StationDirectory<S: BoardSource> {
    inner: Arc<RwLock<Vec<Station>>>,
    source: Arc<S>,
}

impl<S: BoardSource> StationDirectory<S> {
    /// Create a directory by fetching from the backend.
    ///
    /// Fails if the backend is unreachable; callers that want to start
    /// anyway can use [`empty`](Self::empty).
    pub async fn fetch(source: Arc<S>) -> Result<Self, BartError> {
        let stations = source.stations().await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(sorted_by_name(stations))),
            source,
        })
    }

    /// Create an empty directory (for tests and degraded startup).
    pub fn empty(source: Arc<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
            source,
        }
    }

    /// Look up a station by code.
    pub async fn get(&self, code: &StationCode) -> Option<Station> {
        let guard = self.inner.read().await;
        guard.iter().find(|s| &s.code == code).cloned()
    }

    /// All stations, sorted by display name.
    pub async fn all_sorted(&self) -> Vec<Station> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// The first station by display name, if any.
    pub async fn first(&self) -> Option<Station> {
        let guard = self.inner.read().await;
        guard.first().cloned()
    }

    /// Number of stations in the directory.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Whether the directory is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Refresh from the backend, replacing the directory wholesale.
    ///
    /// On failure the existing directory is preserved and the error is
    /// returned.
    pub async fn refresh(&self) -> Result<usize, BartError> {
        let stations = self.source.stations().await?;
        let stations = sorted_by_name(stations);
        let count = stations.len();

        let mut guard = self.inner.write().await;
        *guard = stations;
        info!(count, "station directory refreshed");

        Ok(count)
    }
}

fn sorted_by_name(mut stations: Vec<Station>) -> Vec<Station> {
    stations.sort_by(|a, b| a.name.cmp(&b.name));
    stations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bart::BartError;
    use crate::domain::Departure;
    use futures::future::BoxFuture;
    use std::sync::Mutex;

    /// Source whose station list can be swapped or poisoned between calls.
    struct FlakySource {
        stations: Mutex<Result<Vec<Station>, ()>>,
    }

    impl FlakySource {
        fn serving(stations: Vec<Station>) -> Arc<Self> {
            Arc::new(Self {
                stations: Mutex::new(Ok(stations)),
            })
        }

        fn set(&self, next: Result<Vec<Station>, ()>) {
            *self.stations.lock().unwrap() = next;
        }
    }

    impl BoardSource for FlakySource {
        fn stations(&self) -> BoxFuture<'_, Result<Vec<Station>, BartError>> {
            let result = match &*self.stations.lock().unwrap() {
                Ok(stations) => Ok(stations.clone()),
                Err(()) => Err(BartError::Api {
                    status: 503,
                    message: "unavailable".into(),
                }),
            };
            Box::pin(async move { result })
        }

        fn departures(
            &self,
            _station: StationCode,
        ) -> BoxFuture<'_, Result<Vec<Departure>, BartError>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    fn station(code: &str, name: &str) -> Station {
        Station::new(StationCode::parse(code).unwrap(), name)
    }

    #[tokio::test]
    async fn fetch_sorts_by_name() {
        let source = FlakySource::serving(vec![
            station("MCAR", "MacArthur"),
            station("12TH", "12th St. Oakland City Center"),
            station("EMBR", "Embarcadero"),
        ]);

        let directory = StationDirectory::fetch(source).await.unwrap();

        let names: Vec<String> = directory
            .all_sorted()
            .await
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            ["12th St. Oakland City Center", "Embarcadero", "MacArthur"]
        );
        assert_eq!(directory.first().await.unwrap().code.as_str(), "12TH");
    }

    #[tokio::test]
    async fn get_finds_by_code() {
        let source = FlakySource::serving(vec![station("MCAR", "MacArthur")]);
        let directory = StationDirectory::fetch(source).await.unwrap();

        let found = directory.get(&StationCode::parse("MCAR").unwrap()).await;
        assert_eq!(found.unwrap().name, "MacArthur");

        let missing = directory.get(&StationCode::parse("SFIA").unwrap()).await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn refresh_replaces_wholesale() {
        let source = FlakySource::serving(vec![station("MCAR", "MacArthur")]);
        let directory = StationDirectory::fetch(Arc::clone(&source)).await.unwrap();
        assert_eq!(directory.len().await, 1);

        source.set(Ok(vec![
            station("12TH", "12th St. Oakland City Center"),
            station("EMBR", "Embarcadero"),
        ]));
        let count = directory.refresh().await.unwrap();
        assert_eq!(count, 2);

        // The old entry is gone, not merged.
        assert!(
            directory
                .get(&StationCode::parse("MCAR").unwrap())
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn failed_refresh_preserves_existing_directory() {
        let source = FlakySource::serving(vec![station("MCAR", "MacArthur")]);
        let directory = StationDirectory::fetch(Arc::clone(&source)).await.unwrap();

        source.set(Err(()));
        assert!(directory.refresh().await.is_err());

        assert_eq!(directory.len().await, 1);
        assert!(!directory.is_empty().await);
    }

    #[tokio::test]
    async fn empty_directory() {
        let source = FlakySource::serving(Vec::new());
        let directory = StationDirectory::empty(source);
        assert!(directory.is_empty().await);
        assert!(directory.first().await.is_none());
    }
}
