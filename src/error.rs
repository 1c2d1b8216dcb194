//! Failure taxonomy for conformance calls.
//!
//! Every variant aborts the whole top-level call; the first violation met in
//! traversal order is the one reported.
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::path::Path;

pub type Result<T> = std::result::Result<T, ConformError>;

/// Container kind the data was required to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    Array,
    Map,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Array => f.write_str("an array"),
            Container::Map => f.write_str("a map"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConformError {
    #[error("'{actual}' is not equal to '{expected}' at '{path}'")]
    Mismatch { expected: String, actual: String, path: Path },

    #[error("'{actual}' does not meet spec for '{path}'{}", detail_suffix(.detail))]
    PredicateUnmet { actual: String, path: Path, detail: Option<String> },

    /// A bare function said no. Same kind as [`ConformError::PredicateUnmet`];
    /// a matcher's own wording replaces the generic sentence.
    #[error("{}", expectation_message(.actual, .path, .reason))]
    ExpectationUnmet { actual: String, path: Path, reason: Option<String> },

    #[error("the value at path '{path}' is missing")]
    MissingValue { path: Path },

    #[error("does not include '{key}' at '{path}'")]
    MissingKey { key: String, path: Path },

    #[error("'{actual}' must be {expected} at '{path}'")]
    TypeMismatch { expected: Container, actual: String, path: Path },

    /// Raised while building a key set, never during a walk.
    #[error("'{key}' cannot be both required and optional")]
    KeyCollision { key: String },
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(text) => format!(": '{text}'"),
        None => String::new(),
    }
}

fn expectation_message(actual: &str, path: &Path, reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!("'{actual}' {reason} at '{path}'"),
        None => format!("'{actual}' does not meet expectation at '{path}'"),
    }
}

/// A check refusing a value, with its own wording (builtin matchers use this).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' {reason}.")]
pub struct Rejected {
    pub value: String,
    pub reason: String,
}

impl Rejected {
    pub fn new(value: &serde_json::Value, reason: impl Into<String>) -> Self {
        Self { value: crate::value::render(value), reason: reason.into() }
    }
}

// ------------------------------- Reporting -------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Mismatch,
    PredicateUnmet,
    MissingValue,
    MissingKey,
    TypeMismatch,
    KeyCollision,
}

/// Flat, serializable view of a failure for callers that log or ship errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
}

impl ConformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConformError::Mismatch { .. } => ErrorKind::Mismatch,
            ConformError::PredicateUnmet { .. } | ConformError::ExpectationUnmet { .. } => {
                ErrorKind::PredicateUnmet
            }
            ConformError::MissingValue { .. } => ErrorKind::MissingValue,
            ConformError::MissingKey { .. } => ErrorKind::MissingKey,
            ConformError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ConformError::KeyCollision { .. } => ErrorKind::KeyCollision,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            ConformError::Mismatch { path, .. }
            | ConformError::PredicateUnmet { path, .. }
            | ConformError::ExpectationUnmet { path, .. }
            | ConformError::MissingValue { path }
            | ConformError::MissingKey { path, .. }
            | ConformError::TypeMismatch { path, .. } => Some(path),
            ConformError::KeyCollision { .. } => None,
        }
    }

    pub fn report(&self) -> Report {
        let (value, spec) = match self {
            ConformError::Mismatch { expected, actual, .. } => (Some(actual.clone()), Some(expected.clone())),
            ConformError::PredicateUnmet { actual, detail, .. } => (Some(actual.clone()), detail.clone()),
            ConformError::ExpectationUnmet { actual, reason, .. } => (Some(actual.clone()), reason.clone()),
            ConformError::MissingValue { .. } => (None, None),
            ConformError::MissingKey { key, .. } => (None, Some(key.clone())),
            ConformError::TypeMismatch { expected, actual, .. } => (Some(actual.clone()), Some(expected.to_string())),
            ConformError::KeyCollision { key } => (None, Some(key.clone())),
        };
        Report {
            kind: self.kind(),
            message: self.to_string(),
            path: self.path().cloned(),
            value,
            spec,
        }
    }
}
