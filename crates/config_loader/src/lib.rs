//! # Config Loader
//!
//! Device profile loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON device profiles
//! - Validate profile legality
//! - Generate `DeviceProfile`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let profile = ConfigLoader::load_from_path(Path::new("device.toml")).unwrap();
//! println!("Model: {}", profile.device.model);
//! ```

mod parser;
mod validator;

pub use contracts::DeviceProfile;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load device profiles from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load profile from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<DeviceProfile, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load profile from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<DeviceProfile, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Check an already-built profile (e.g. the built-in reference phone)
    pub fn validate(profile: &DeviceProfile) -> Result<(), ContractError> {
        validator::validate(profile)
    }

    /// Serialize DeviceProfile to TOML string
    pub fn to_toml(profile: &DeviceProfile) -> Result<String, ContractError> {
        toml::to_string_pretty(profile)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize DeviceProfile to JSON string
    pub fn to_json(profile: &DeviceProfile) -> Result<String, ContractError> {
        serde_json::to_string_pretty(profile)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<DeviceProfile, ContractError> {
        let profile = parser::parse(content, format)?;
        validator::validate(&profile)?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::SensorKind;
    use std::io::Write;

    const MINIMAL_TOML: &str = r#"
[device]
model = "Tablet"

[[sensors]]
kind = "accelerometer"
name = "KX023 Accelerometer"
vendor = "Kionix"
max_frequency_hz = 100.0

[[sensors]]
kind = "ambient_temperature"
name = "TMP116 Temperature"
vendor = "TI"
max_frequency_hz = 1.0
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let profile = result.unwrap();
        assert_eq!(profile.device.model, "Tablet");
        assert!(profile.sensor(SensorKind::AmbientTemperature).is_some());
    }

    #[test]
    fn test_toml_output_loads_as_same_profile() {
        let profile = DeviceProfile::reference_phone();
        let serialized = ConfigLoader::to_toml(&profile).unwrap();
        let reloaded = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(profile.device.model, reloaded.device.model);
        assert_eq!(profile.sensors.len(), reloaded.sensors.len());
        assert_eq!(profile.sensors[3].kind, reloaded.sensors[3].kind);
    }

    #[test]
    fn test_json_output_loads_as_same_profile() {
        let profile = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&profile).unwrap();
        let reloaded = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(profile.sensors[1].vendor, reloaded.sensors[1].vendor);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(MINIMAL_TOML.as_bytes()).unwrap();

        let profile = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(profile.sensors.len(), 2);
    }

    #[test]
    fn test_load_from_path_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = ConfigLoader::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[device]
model = "Tablet"

[[sensors]]
kind = "light"
name = "A"
vendor = "V"

[[sensors]]
kind = "light"
name = "B"
vendor = "V"
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }
}
