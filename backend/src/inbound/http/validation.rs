//! Shared validation helpers for inbound HTTP adapters.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::domain::{Error, FieldViolation};

/// Form field that accepts a JSON string or a bare number.
///
/// Clients send numeric fields (year, cost, car id) either way; the domain
/// parses the text so both spellings meet the same validation rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormText(String);

impl FormText {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FormText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FormText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

/// Parse a positive identifier from a path segment.
pub(crate) fn parse_path_id<T>(
    raw: &str,
    parse: impl FnOnce(&'static str, &str) -> Result<T, FieldViolation>,
) -> Result<T, Error> {
    parse("id", raw).map_err(Error::from)
}
