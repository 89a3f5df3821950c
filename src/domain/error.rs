//! Domain error types.
//!
//! Only local, synchronous failures live here (validation, config, I/O).
//! Remote fetch failures are not Rust errors: they arrive as payloads on
//! reply events and are recovered into the render surface's error slots.

use chrono::NaiveDate;

/// Top-level error type for statchart.
#[derive(Debug, thiserror::Error)]
pub enum StatchartError {
    #[error("Start date cannot be after end date.")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown stat: {name}")]
    UnknownStat { name: String },

    #[error("invalid stat list: {reason}")]
    InvalidStatList { reason: String },

    #[error("unknown ticker: {ticker}")]
    UnknownTicker { ticker: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StatchartError> for std::process::ExitCode {
    fn from(err: &StatchartError) -> Self {
        let code: u8 = match err {
            StatchartError::Io(_) => 1,
            StatchartError::ConfigParse { .. }
            | StatchartError::ConfigMissing { .. }
            | StatchartError::ConfigInvalid { .. } => 2,
            StatchartError::InvalidRange { .. } => 3,
            StatchartError::UnknownStat { .. }
            | StatchartError::InvalidStatList { .. }
            | StatchartError::UnknownTicker { .. } => 4,
            StatchartError::Data { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
