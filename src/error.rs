//! # Error Types
//!
//! This module defines the error type shared by every selection strategy.
//! Each variant names one failure scenario: bad configuration, malformed
//! population data, or a bounded loop that ran out of attempts.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genselect::error::{Result, SelectionError};
//!
//! fn check_target(target_size: usize) -> Result<usize> {
//!     if target_size == 0 {
//!         return Err(SelectionError::Configuration(
//!             "Target size must be at least 1".to_string(),
//!         ));
//!     }
//!     Ok(target_size)
//! }
//!
//! assert!(check_target(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genselect::error::{OptionExt, SelectionError};
//!
//! fn best_value(values: &[f64]) -> genselect::error::Result<f64> {
//!     values
//!         .iter()
//!         .copied()
//!         .reduce(f64::max)
//!         .ok_or_else_selection(|| SelectionError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_value(&[1.0, 3.0]).unwrap(), 3.0);
//! ```

use thiserror::Error;

/// Represents errors that can occur while selecting individuals.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot select from an empty population")]
    EmptyPopulation,

    /// Error that occurs when performance vectors differ in length.
    #[error(
        "Performance length mismatch: individual {index} has {found} cases, expected {expected}"
    )]
    PerformanceLengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// Error that occurs when an individual does not expose a requested objective.
    #[error("Unknown objective: individual {index} has no objective named '{name}'")]
    UnknownObjective { index: usize, name: String },

    /// Error that occurs when NaN or infinity values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Error that occurs when a random number generation fails.
    #[error("Random generation error: {0}")]
    RandomGeneration(String),

    /// Error that occurs when a bounded loop exhausts its attempts.
    #[error("Maximum attempts reached: {0}")]
    MaxAttemptsReached(String),

    /// Error that occurs when an internal invariant does not hold.
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

/// A specialized Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, SelectionError>` using
    /// a closure to generate the error.
    fn ok_or_else_selection<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SelectionError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_selection<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SelectionError,
    {
        self.ok_or_else(err_fn)
    }
}
