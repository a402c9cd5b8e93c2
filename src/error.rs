//! # Error Types
//!
//! This module defines error types used throughout the denpyo library.
//!
//! | Variant | Raised when | Recovery |
//! |---------|-------------|----------|
//! | `Validation` | a required field is absent or the request is unreadable | none, composition never starts |
//! | `ItemParse` | a single order item is malformed | item skipped, recorded as a [`Diagnostic`] |
//! | `Configuration` | a policy enum or profile name is out of range | none, fatal to the request |
//! | `Output` | the output sink fails | none, surfaced verbatim |

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Main error type for denpyo operations
#[derive(Debug, Error)]
pub enum DenpyoError {
    /// A required field is missing or a value is unusable
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single order item could not be read
    #[error("Item {index}: {reason}")]
    ItemParse { index: usize, reason: String },

    /// A policy value or printer profile is out of range
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The output sink reported a failure
    #[error("Output error: {0}")]
    Output(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DenpyoError>;

/// Coarse classification of a [`DenpyoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    ItemParse,
    Configuration,
    Output,
}

impl DenpyoError {
    /// Classify this error. I/O failures count as output failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DenpyoError::Validation(_) => ErrorKind::Validation,
            DenpyoError::ItemParse { .. } => ErrorKind::ItemParse,
            DenpyoError::Configuration(_) => ErrorKind::Configuration,
            DenpyoError::Output(_) | DenpyoError::Io(_) => ErrorKind::Output,
        }
    }
}

/// A recovered item failure, kept alongside a successfully composed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Position of the entry in the incoming `orderItems` array.
    pub index: usize,
    pub reason: String,
}

impl Diagnostic {
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item {} skipped: {}", self.index, self.reason)
    }
}

impl From<Diagnostic> for DenpyoError {
    fn from(d: Diagnostic) -> Self {
        DenpyoError::ItemParse {
            index: d.index,
            reason: d.reason,
        }
    }
}
