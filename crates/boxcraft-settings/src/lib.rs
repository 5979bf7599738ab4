//! Boxcraft Settings Crate
//!
//! Handles box job configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{BoxJobConfig, DimensionOverrides, LengthValue, RenderSettings, DEFAULT_CONFIG_FILE};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
