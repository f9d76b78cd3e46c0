use thiserror::Error;

/// Schema and content violations found while loading a launch table.
///
/// Any of these aborts startup; the loader wraps them in `anyhow` context
/// naming the file and row.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidOutcome { row: usize, value: String },

    #[error("row {row}: payload mass must be a non-negative number, got {value}")]
    InvalidPayload { row: usize, value: String },

    #[error("row {row}: launch site is empty")]
    EmptyLaunchSite { row: usize },

    #[error("dataset contains no launch records")]
    NoRecords,

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

/// Rejected payload range selection.
#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("payload range bounds must be finite")]
    NotFinite,

    #[error("payload range {low}-{high} is inverted")]
    Inverted { low: f64, high: f64 },

    #[error("payload range {low}-{high} lies outside {min}-{max}")]
    OutOfDomain { low: f64, high: f64, min: f64, max: f64 },
}
