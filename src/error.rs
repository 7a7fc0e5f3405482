//! Error types for parameter validation, projection and reporting

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolarRoiError {
    #[error("Invalid parameter: {field} ({reason})")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Degenerate result: {metric} is not a finite number")]
    DegenerateResult { metric: &'static str },

    #[error("No yearly data to export")]
    EmptySeries,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SolarRoiError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SolarRoiError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SolarRoiError>;
