//! Drawing handle system using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Handle type prefixes, one per kind of drawing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HandlePrefix {
    /// Layer table record
    Lyr,
    /// Dimension (measurement) entity
    Dim,
    /// Multiline text entity (balloons use this)
    Text,
    /// Line entity
    Line,
    /// Circle entity
    Circ,
    /// Table entity
    Tbl,
}

impl HandlePrefix {
    /// Get the string representation of the prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlePrefix::Lyr => "LYR",
            HandlePrefix::Dim => "DIM",
            HandlePrefix::Text => "TEXT",
            HandlePrefix::Line => "LINE",
            HandlePrefix::Circ => "CIRC",
            HandlePrefix::Tbl => "TBL",
        }
    }

    /// Get all valid prefixes
    pub fn all() -> &'static [HandlePrefix] {
        &[
            HandlePrefix::Lyr,
            HandlePrefix::Dim,
            HandlePrefix::Text,
            HandlePrefix::Line,
            HandlePrefix::Circ,
            HandlePrefix::Tbl,
        ]
    }
}

impl fmt::Display for HandlePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HandlePrefix {
    type Err = HandleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LYR" => Ok(HandlePrefix::Lyr),
            "DIM" => Ok(HandlePrefix::Dim),
            "TEXT" => Ok(HandlePrefix::Text),
            "LINE" => Ok(HandlePrefix::Line),
            "CIRC" => Ok(HandlePrefix::Circ),
            "TBL" => Ok(HandlePrefix::Tbl),
            _ => Err(HandleParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// An opaque drawing handle combining a record prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    prefix: HandlePrefix,
    ulid: Ulid,
}

impl Handle {
    /// Allocate a fresh handle with the given prefix
    pub fn new(prefix: HandlePrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    /// Create a Handle from a prefix and existing ULID
    pub fn from_parts(prefix: HandlePrefix, ulid: Ulid) -> Self {
        Self { prefix, ulid }
    }

    /// Get the handle prefix
    pub fn prefix(&self) -> HandlePrefix {
        self.prefix
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse a Handle from a string
    pub fn parse(s: &str) -> Result<Self, HandleParseError> {
        s.parse()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for Handle {
    type Err = HandleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| HandleParseError::MissingDelimiter(s.to_string()))?;

        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| HandleParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { prefix, ulid })
    }
}

impl Serialize for Handle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Handle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing handles
#[derive(Debug, Error)]
pub enum HandleParseError {
    #[error("invalid handle prefix: '{0}' (valid: LYR, DIM, TEXT, LINE, CIRC, TBL)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in handle: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}
