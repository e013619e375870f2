//! Mock backend client for development and tests without a network.
//!
//! Loads fixture responses from a directory of JSON files and serves them
//! as if they were live API responses. Fixtures may use either historical
//! body shape (bare array or envelope).

use std::collections::HashMap;
use std::path::Path;

use futures::future::BoxFuture;

use crate::domain::{Departure, Station, StationCode};

use super::error::BartError;
use super::source::BoardSource;
use super::types::{DepartureDto, ListBody, StationDto};

/// Mock client that serves canned data.
///
/// Expects a `stations.json` directory listing plus one `{CODE}.json`
/// departure snapshot per station (e.g. `12TH.json`).
#[derive(Debug, Clone)]
pub struct MockBartClient {
    stations: Vec<Station>,
    boards: HashMap<StationCode, Vec<Departure>>,
}

impl MockBartClient {
    /// Load fixtures from a directory.
    pub fn from_dir(fixture_dir: impl AsRef<Path>) -> Result<Self, BartError> {
        let fixture_dir = fixture_dir.as_ref();

        let stations = read_list::<StationDto>(&fixture_dir.join("stations.json"))?
            .into_iter()
            .filter_map(StationDto::into_station)
            .collect::<Vec<_>>();

        let mut boards = HashMap::new();
        for station in &stations {
            let path = fixture_dir.join(format!("{}.json", station.code));
            if !path.is_file() {
                continue;
            }
            let departures = read_list::<DepartureDto>(&path)?
                .into_iter()
                .map(DepartureDto::into_departure)
                .collect();
            boards.insert(station.code, departures);
        }

        if stations.is_empty() {
            return Err(BartError::Api {
                status: 0,
                message: format!("no usable stations in {:?}", fixture_dir),
            });
        }

        Ok(Self { stations, boards })
    }

    /// Build a mock directly from in-memory data (for tests).
    pub fn from_parts(
        stations: Vec<Station>,
        boards: HashMap<StationCode, Vec<Departure>>,
    ) -> Self {
        Self { stations, boards }
    }
}

impl BoardSource for MockBartClient {
    fn stations(&self) -> BoxFuture<'_, Result<Vec<Station>, BartError>> {
        let stations = self.stations.clone();
        Box::pin(async move { Ok(stations) })
    }

    fn departures(
        &self,
        station: StationCode,
    ) -> BoxFuture<'_, Result<Vec<Departure>, BartError>> {
        let result = match self.boards.get(&station) {
            Some(departures) => Ok(departures.clone()),
            None => Err(BartError::Api {
                status: 404,
                message: format!("no fixture for station {}", station),
            }),
        };
        Box::pin(async move { result })
    }
}

/// Read and unwrap one fixture file.
fn read_list<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, BartError> {
    let json = std::fs::read_to_string(path).map_err(|e| BartError::Api {
        status: 0,
        message: format!("failed to read {:?}: {}", path, e),
    })?;

    let body: ListBody<T> = serde_json::from_str(&json).map_err(|e| BartError::Json {
        message: format!("{:?}: {}", path, e),
        body: Some(json.chars().take(500).collect()),
    })?;

    body.into_records()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixtures(dir: &Path) {
        std::fs::write(
            dir.join("stations.json"),
            r#"[{"abbr": "12TH", "name": "12th St. Oakland City Center"},
                {"abbr": "MCAR", "name": "MacArthur"}]"#,
        )
        .unwrap();

        // Envelope shape on purpose; fixtures may use either.
        std::fs::write(
            dir.join("12TH.json"),
            r#"{"status": "success", "count": 1, "data": [
                {"destination": "Richmond", "direction": "North", "minutes": 4,
                 "platform": "1", "bike_flag": true, "delay": 0,
                 "color": "ORANGE", "length": 10}]}"#,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn serves_fixture_departures() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());

        let mock = MockBartClient::from_dir(dir.path()).unwrap();

        let stations = mock.stations().await.unwrap();
        assert_eq!(stations.len(), 2);

        let code = StationCode::parse("12TH").unwrap();
        let departures = mock.departures(code).await.unwrap();
        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].destination, "Richmond");
    }

    #[tokio::test]
    async fn unknown_station_is_an_api_error() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());

        let mock = MockBartClient::from_dir(dir.path()).unwrap();

        // MCAR is in the directory but has no snapshot fixture.
        let code = StationCode::parse("MCAR").unwrap();
        match mock.departures(code).await {
            Err(BartError::Api { status: 404, .. }) => {}
            other => panic!("expected 404, got {:?}", other),
        }
    }

    #[test]
    fn missing_directory_fails() {
        assert!(MockBartClient::from_dir("/nonexistent/fixtures").is_err());
    }
}
