//! Box job configuration
//!
//! A job is the box inputs plus how to render them and where to write the
//! result. Files are JSON or TOML, chosen by extension. Dimensions may be
//! overridden with unit-suffixed strings such as `"6in"`.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use boxcraft_camtools::hinged_box::{HingedInputs, PanelKind, RenderMode};
use boxcraft_core::units::parse_length_with_unit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the default job file inside the config directory
pub const DEFAULT_CONFIG_FILE: &str = "box.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// A length in millimetres, or a string with an optional unit suffix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LengthValue {
    Millimetres(f64),
    Text(String),
}

impl LengthValue {
    pub fn to_mm(&self, key: &str) -> ConfigResult<f64> {
        match self {
            LengthValue::Millimetres(mm) => Ok(*mm),
            LengthValue::Text(text) => {
                parse_length_with_unit(text).map_err(|source| ConfigError::InvalidLength {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }
}

/// Optional overrides applied on top of `inputs`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<LengthValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<LengthValue>,
}

impl DimensionOverrides {
    pub fn apply(&self, inputs: &mut HingedInputs) -> ConfigResult<()> {
        let fields = [
            ("width", &self.width, &mut inputs.width_mm),
            ("depth", &self.depth, &mut inputs.depth_mm),
            ("height", &self.height, &mut inputs.height_mm),
            ("thickness", &self.thickness, &mut inputs.thickness_mm),
        ];
        for (key, value, target) in fields {
            if let Some(value) = value {
                *target = value.to_mm(key)?;
            }
        }
        Ok(())
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub mode: RenderMode,
    /// Prepended to the panel name to form each file name
    pub output_prefix: String,
    pub output_directory: PathBuf,
    /// Run the regression checker over the output
    pub check: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            output_prefix: "hinged_box_".to_string(),
            output_directory: PathBuf::from("."),
            check: true,
        }
    }
}

/// Complete job configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxJobConfig {
    pub inputs: HingedInputs,
    pub dimensions: DimensionOverrides,
    pub render: RenderSettings,
}

impl BoxJobConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded box job config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        info!(path = %path.display(), "saved box job config");
        Ok(())
    }

    /// Inputs with the dimension overrides applied.
    pub fn resolved_inputs(&self) -> SettingsResult<HingedInputs> {
        let mut inputs = self.inputs.clone();
        self.dimensions.apply(&mut inputs)?;
        Ok(inputs)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.resolved_inputs()?.validate()?;

        if self.render.output_prefix.contains(['/', '\\']) {
            return Err(SettingsError::InvalidSetting {
                key: "render.output_prefix".to_string(),
                reason: "must not contain a path separator".to_string(),
            });
        }
        Ok(())
    }

    /// Where the SVG for `kind` is written.
    pub fn output_path(&self, kind: PanelKind) -> PathBuf {
        self.render
            .output_directory
            .join(format!("{}{}.svg", self.render.output_prefix, kind))
    }

    /// Platform config directory for boxcraft.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("boxcraft"))
            .ok_or_else(|| SettingsError::ConfigDirectory("no config directory on this platform".to_string()))
    }

    pub fn default_config_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(DEFAULT_CONFIG_FILE))
    }

    /// Load the default job file if there is one, else the defaults.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            debug!(path = %path.display(), "no default config, using built-in defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_value() {
        assert_eq!(LengthValue::Millimetres(12.5).to_mm("w").unwrap(), 12.5);
        assert_eq!(LengthValue::Text("2cm".to_string()).to_mm("w").unwrap(), 20.0);
        assert!((LengthValue::Text("6in".to_string()).to_mm("w").unwrap() - 152.4).abs() < 1e-9);
        assert!(matches!(
            LengthValue::Text("6 parsecs".to_string()).to_mm("w"),
            Err(ConfigError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_overrides_apply() {
        let config = BoxJobConfig {
            dimensions: DimensionOverrides {
                width: Some(LengthValue::Text("200mm".to_string())),
                thickness: Some(LengthValue::Millimetres(4.0)),
                ..DimensionOverrides::default()
            },
            ..BoxJobConfig::default()
        };
        let inputs = config.resolved_inputs().unwrap();
        assert_eq!(inputs.width_mm, 200.0);
        assert_eq!(inputs.thickness_mm, 4.0);
        assert_eq!(inputs.depth_mm, 156.0);
    }

    #[test]
    fn test_validate() {
        assert!(BoxJobConfig::default().validate().is_ok());

        let mut config = BoxJobConfig::default();
        config.render.output_prefix = "../escape".to_string();
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { .. })
        ));

        let mut config = BoxJobConfig::default();
        config.inputs.height_mm = -1.0;
        assert!(matches!(config.validate(), Err(SettingsError::Inputs(_))));
    }

    #[test]
    fn test_output_path() {
        let mut config = BoxJobConfig::default();
        config.render.output_directory = PathBuf::from("out");
        assert_eq!(
            config.output_path(PanelKind::Lid),
            PathBuf::from("out").join("hinged_box_lid.svg")
        );
    }

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            ConfigFormat::from_path(Path::new("job.yaml")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
        assert!(ConfigFormat::from_path(Path::new("job")).is_err());
    }
}
