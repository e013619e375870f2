//! Station identifier and directory entry types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid BART station abbreviation.
///
/// Station codes are 1 to 4 uppercase ASCII letters or digits (`12TH`,
/// `MCAR`, `SFIA`). This type guarantees that any `StationCode` value is
/// valid by construction.
///
/// # Examples
///
/// ```
/// use bart_server::domain::StationCode;
///
/// let twelfth = StationCode::parse("12TH").unwrap();
/// assert_eq!(twelfth.as_str(), "12TH");
///
/// // Lowercase is rejected; use parse_normalized for user input
/// assert!(StationCode::parse("12th").is_err());
/// assert!(StationCode::parse_normalized("12th").is_ok());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("TOOLONG").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationCode {
    bytes: [u8; 4],
    len: u8,
}

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 1 to 4 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let raw = s.as_bytes();

        if raw.is_empty() || raw.len() > 4 {
            return Err(InvalidStationCode {
                reason: "must be 1 to 4 characters",
            });
        }

        let mut bytes = [0u8; 4];
        for (i, &b) in raw.iter().enumerate() {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
            bytes[i] = b;
        }

        Ok(StationCode {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Parse a station code, uppercasing the input first.
    ///
    /// Useful for query parameters and user input where casing varies.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII letters and digits are ever stored
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station in the network directory.
///
/// Fetched wholesale from the backend; immutable between refreshes. The
/// address fields are optional because older directory revisions carry only
/// the code and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

impl Station {
    /// Create a station with only a code and name.
    pub fn new(code: StationCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            address: None,
            city: None,
            county: None,
            state: None,
            zipcode: None,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating valid station codes.
    fn valid_code_string() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Z0-9]{1,4}").unwrap()
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in valid_code_string()) {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Any valid code can be parsed
        #[test]
        fn valid_always_parses(s in valid_code_string()) {
            prop_assert!(StationCode::parse(&s).is_ok());
        }

        /// Lowercase letters are always rejected by the strict parser
        #[test]
        fn lowercase_rejected(s in "[a-z]{1,4}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }

        /// parse_normalized accepts anything the strict parser accepts
        /// after uppercasing
        #[test]
        fn normalized_agrees_with_parse(s in valid_code_string()) {
            let lowered = s.to_ascii_lowercase();
            prop_assert_eq!(
                StationCode::parse_normalized(&lowered).unwrap(),
                StationCode::parse(&s).unwrap()
            );
        }

        /// Overlong strings are always rejected
        #[test]
        fn overlong_rejected(s in "[A-Z0-9]{5,12}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}
