//! Error handling for Divvy
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for portfolio operations
#[derive(Error, Debug)]
pub enum DivvyError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid draft: {0}")]
    InvalidDraft(String),

    #[error("lookup error: {0}")]
    Lookup(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for portfolio operations
pub type Result<T> = anyhow::Result<T>;
