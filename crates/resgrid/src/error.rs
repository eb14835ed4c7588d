//! Error types for resgrid operations.
//!
//! This module provides the main error type [`ResgridError`] which wraps the
//! error conditions that can occur while loading reservation data and
//! configuration. Rejected reservation rows are reported through
//! [`crate::ingest::Ingested`] instead. Layout itself is total and never fails.

use std::io;

use thiserror::Error;

/// The main error type for resgrid operations.
#[derive(Debug, Error)]
pub enum ResgridError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
