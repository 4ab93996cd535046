//! # Error Types
//!
//! Domain errors raised while assembling, transforming and drawing a scale.
//! File-facing operations wrap these in `anyhow::Error` with context, so
//! callers that need to branch on the kind can `downcast_ref::<ScaleError>()`.

use thiserror::Error;

/// Result type alias for scale operations that do not touch the filesystem
pub type ScaleResult<T> = Result<T, ScaleError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    /// The scale type string matched none of the known aliases
    #[error("Unknown scale type: '{0}'")]
    UnknownScaleType(String),

    /// A second attempt to set the scale type; the first setting is kept
    #[error("Unable to set scale: scale type already set")]
    AlreadySet,

    /// A numeric scale parameter that would make every position undefined
    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: String, value: f64 },

    /// Drawing requires the scale type to be set first
    #[error("Unable to draw scale: scale type not set")]
    NotSet,

    /// A table is missing a column the engine needs
    #[error("Missing column '{column}' in {table}")]
    MissingColumn { table: String, column: String },

    /// A cell could not be parsed as the expected type
    #[error("Invalid value '{value}' for '{column}' in {table}")]
    InvalidField {
        table: String,
        column: String,
        value: String,
    },

    /// A single-row table had no rows
    #[error("{0} has no rows")]
    EmptyTable(String),
}
