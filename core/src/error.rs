use thiserror::Error;

use crate::types::TimerId;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Config I/O error at {path}: {source}")]
    ConfigIo {
        path:   String,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Timer {id} is not armed")]
    TimerNotFound { id: TimerId },

    #[error("Dashboard already torn down")]
    TornDown,
}

pub type DashResult<T> = Result<T, DashError>;

/// Failure raised by a single view adapter. Never escapes a scheduler tick.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Render target '{target}' is not mounted")]
    MissingTarget { target: &'static str },

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Surface I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ViewResult<T> = Result<T, ViewError>;
