//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for panel generation,
//! SVG emission, and reference-template path processing.

use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Emitted path data contains a curve command. Panel generators only
    /// produce straight segments, so this is a generator defect.
    #[error("Curve command '{command}' at offset {position} in laser path")]
    CurveCommand { command: char, position: usize },

    /// A geometry operation produced unusable output.
    #[error("Geometry error: {0}")]
    GeometryError(String),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// A file format error occurred.
    #[error("File format error: {0}")]
    FileFormat(#[from] FileFormatError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Errors related to SVG path data parsing.
#[derive(Error, Debug)]
pub enum FileFormatError {
    /// The SVG path data could not be parsed.
    #[error("SVG parse error at offset {position}: {reason}")]
    SvgParseError { position: usize, reason: String },

    /// The path data is empty or contains no usable data.
    #[error("Empty path data: {0}")]
    EmptyPath(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Result type alias for path parsing operations.
pub type FileFormatResult<T> = Result<T, FileFormatError>;
