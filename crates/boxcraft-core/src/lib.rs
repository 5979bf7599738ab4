//! # boxcraft Core
//!
//! Core types and utilities shared by the boxcraft crates.
//! Provides the millimetre geometry primitives, length unit handling,
//! and the length parsing error.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::UnitError;
pub use geometry::{BoundingBox, Point2D};
pub use units::{format_mm, parse_length, parse_length_with_unit, MeasurementSystem};
