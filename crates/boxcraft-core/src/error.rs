//! Error handling for boxcraft
//!
//! Length parsing errors shared by the workspace crates.

use thiserror::Error;

/// Length / unit parsing error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// The text is not a number in the expected notation
    #[error("Invalid number '{input}': {reason}")]
    InvalidNumber {
        /// The offending input text.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A fraction had a zero denominator
    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),

    /// A fraction was not of the form `a/b`
    #[error("Invalid fraction format: {0}")]
    InvalidFraction(String),

    /// The unit suffix is not recognised
    #[error("Unknown unit suffix: {0}")]
    UnknownUnit(String),
}
