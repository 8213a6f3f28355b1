//! Error types.
//!
//! [`Error`] covers infrastructure failures (binding a port, bad
//! configuration). The data layer has its own [`LoadError`] and the spider
//! filter its own [`QueryError`]; neither ever escapes a handler as a Rust
//! error. They are turned into HTTP responses (or an empty table) first.

use std::fmt;
use std::path::PathBuf;

/// The error type returned by the service's fallible start-up operations.
#[derive(Debug)]
pub enum Error {
    /// Binding or accepting on the listener failed.
    Io(std::io::Error),
    /// An environment variable held a value that cannot be used.
    Config { key: &'static str, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Config { key, value } => write!(f, "config: invalid {key}={value:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ── LoadError ─────────────────────────────────────────────────────────────────

/// Why the CSV file could not be turned into a table.
#[derive(Debug)]
pub enum LoadError {
    NotFound(PathBuf),
    Io(PathBuf, std::io::Error),
    Csv(PathBuf, csv::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(p) => write!(f, "CSV file not found at: {}", p.display()),
            Self::Io(p, e) => write!(f, "error reading {}: {e}", p.display()),
            Self::Csv(p, e) => write!(f, "error parsing {}: {e}", p.display()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(_, e) => Some(e),
            Self::Csv(_, e) => Some(e),
        }
    }
}

// ── QueryError ────────────────────────────────────────────────────────────────

/// A spider-plot query parameter that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    InvalidDose(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDose(raw) => write!(f, "invalid dose value: '{raw}'"),
        }
    }
}

impl std::error::Error for QueryError {}
