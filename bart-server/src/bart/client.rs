//! Backend HTTP client.
//!
//! Provides async methods for the station directory, live departures, and
//! the historical analytics endpoints. Every call is a single best-effort
//! request: no retries, no caching.

use serde::de::DeserializeOwned;

use crate::domain::{DailyStats, DelayPattern, Departure, DestinationStats, Station, StationCode};

use super::error::BartError;
use super::types::{DepartureDto, ListBody, StationDto};

/// Default base URL for the dashboard backend.
///
/// Older deployments served the same endpoints without the `/api` prefix;
/// the prefix is part of the base URL so nothing downstream cares which
/// revision it is pointed at.
const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the backend client.
#[derive(Debug, Clone)]
pub struct BartConfig {
    /// Base URL including any path prefix, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl BartConfig {
    /// Create a config with the default base URL.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the base URL from `BART_API_BASE`, falling back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(base) = std::env::var("BART_API_BASE") {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        config
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for BartConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the dashboard backend.
#[derive(Debug, Clone)]
pub struct BartClient {
    http: reqwest::Client,
    base_url: String,
}

impl BartClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BartConfig) -> Result<Self, BartError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the station directory.
    ///
    /// Directory rows whose code does not parse are skipped; an entirely
    /// unparseable directory is an empty list, not an error.
    pub async fn list_stations(&self) -> Result<Vec<Station>, BartError> {
        let url = format!("{}/stations", self.base_url);
        let dtos: Vec<StationDto> = self.fetch_records(self.http.get(&url)).await?;

        Ok(dtos.into_iter().filter_map(StationDto::into_station).collect())
    }

    /// Fetch the current departure snapshot for one station.
    pub async fn list_departures(
        &self,
        station: &StationCode,
    ) -> Result<Vec<Departure>, BartError> {
        let url = format!("{}/departures/{}", self.base_url, station);
        let dtos: Vec<DepartureDto> = self.fetch_records(self.http.get(&url)).await?;

        Ok(dtos.into_iter().map(DepartureDto::into_departure).collect())
    }

    /// Fetch per-day departure and delay totals for the last `days` days.
    pub async fn daily_stats(&self, days: u32) -> Result<Vec<DailyStats>, BartError> {
        let url = format!("{}/analytics/daily", self.base_url);
        self.fetch_records(self.http.get(&url).query(&[("days", days)]))
            .await
    }

    /// Fetch per-hour delay patterns for the last `days` days.
    pub async fn delay_patterns(&self, days: u32) -> Result<Vec<DelayPattern>, BartError> {
        let url = format!("{}/analytics/delays", self.base_url);
        self.fetch_records(self.http.get(&url).query(&[("days", days)]))
            .await
    }

    /// Fetch per-destination totals for one station.
    ///
    /// The backend keys this endpoint by station *name*, not code.
    pub async fn station_stats(
        &self,
        station_name: &str,
        days: u32,
    ) -> Result<Vec<DestinationStats>, BartError> {
        let url = format!("{}/analytics/station", self.base_url);
        self.fetch_records(
            self.http
                .get(&url)
                .query(&[("station", station_name)])
                .query(&[("days", days)]),
        )
        .await
    }

    /// Fetch per-destination totals across all stations.
    pub async fn all_station_stats(&self) -> Result<Vec<DestinationStats>, BartError> {
        let url = format!("{}/analytics/stations", self.base_url);
        self.fetch_records(self.http.get(&url)).await
    }

    /// Issue a request and normalize the response into a record list.
    ///
    /// Non-2xx statuses become `Api` errors before any parsing happens;
    /// both historical body shapes are accepted after that.
    async fn fetch_records<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<T>, BartError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BartError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: ListBody<T> = serde_json::from_str(&body).map_err(|e| BartError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        parsed.into_records()
    }
}
