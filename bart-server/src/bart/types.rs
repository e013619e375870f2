//! Backend API response DTOs.
//!
//! The backend's response shapes drifted across revisions: list endpoints
//! return either a bare JSON array or a `{status, count, data, message?}`
//! envelope, and the oldest stations endpoint returned plain strings rather
//! than station objects. Everything here exists to absorb that drift before
//! it reaches domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::domain::{Departure, Station, StationCode};

use super::error::BartError;

/// The `{status, count, data, message?}` envelope some backend revisions
/// wrap list responses in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub message: Option<String>,
}

/// A list response in either historical shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Wrapped(ApiEnvelope<T>),
    Bare(Vec<T>),
}

impl<T> ListBody<T> {
    /// Unwrap to the record list, surfacing envelope-level errors.
    ///
    /// Callers never branch on the envelope shape; this is the only place
    /// that looks at it.
    pub fn into_records(self) -> Result<Vec<T>, BartError> {
        match self {
            ListBody::Bare(records) => Ok(records),
            ListBody::Wrapped(envelope) => {
                if envelope.status == "error" {
                    return Err(BartError::Backend {
                        message: envelope
                            .message
                            .unwrap_or_else(|| "backend reported an error".into()),
                    });
                }
                Ok(envelope.data)
            }
        }
    }
}

/// A station directory entry in either historical shape.
///
/// Newer revisions send full objects; the oldest sent just the station
/// code as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StationDto {
    Full {
        abbr: String,
        name: String,
        address: Option<String>,
        city: Option<String>,
        county: Option<String>,
        state: Option<String>,
        zipcode: Option<String>,
    },
    Code(String),
}

impl StationDto {
    /// Convert to the domain type.
    ///
    /// Returns `None` when the code does not parse (some historical
    /// directory rows carry free-text names in the code position); those
    /// rows are skipped rather than failing the whole directory.
    pub fn into_station(self) -> Option<Station> {
        match self {
            StationDto::Full {
                abbr,
                name,
                address,
                city,
                county,
                state,
                zipcode,
            } => {
                let code = StationCode::parse_normalized(&abbr).ok()?;
                Some(Station {
                    code,
                    name,
                    address,
                    city,
                    county,
                    state,
                    zipcode,
                })
            }
            StationDto::Code(raw) => {
                let code = StationCode::parse_normalized(&raw).ok()?;
                Some(Station::new(code, raw))
            }
        }
    }
}

/// A departure row as the backend sends it.
///
/// Every field except the destination is optional: the backend serves rows
/// straight out of its warehouse, where columns can be null.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartureDto {
    pub destination: String,
    pub direction: Option<String>,
    pub minutes: Option<u32>,
    pub platform: Option<String>,
    pub bike_flag: Option<bool>,
    pub delay: Option<f64>,
    pub color: Option<String>,
    pub length: Option<u32>,
    pub timestamp: Option<String>,
}

impl DepartureDto {
    /// Convert to the domain type, defaulting absent fields.
    pub fn into_departure(self) -> Departure {
        Departure {
            destination: self.destination,
            direction: self.direction.unwrap_or_default(),
            minutes: self.minutes.unwrap_or_default(),
            platform: self.platform.unwrap_or_default(),
            bike_flag: self.bike_flag.unwrap_or_default(),
            delay: self.delay.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            length: self.length.unwrap_or_default(),
            timestamp: self.timestamp.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Parse a backend timestamp.
///
/// RFC 3339 with an offset is the common case; naive datetimes (no offset)
/// are treated as UTC, matching how the backend stores them.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
