//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{DeviceProfile, SensorKind};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    profile_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ProfileSummary>,
}

#[derive(Serialize)]
struct ProfileSummary {
    model: String,
    sensor_count: usize,
    missing_kinds: Vec<SensorKind>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(profile = %args.profile.display(), "Validating device profile");

    let result = validate_profile(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Device profile validation failed")
    }
}

fn validate_profile(args: &ValidateArgs) -> ValidationResult {
    let profile_path = args.profile.display().to_string();

    if !args.profile.exists() {
        return ValidationResult {
            valid: false,
            profile_path,
            error: Some(format!("File not found: {}", args.profile.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.profile) {
        Ok(profile) => {
            let warnings = collect_warnings(&profile);
            ValidationResult {
                valid: true,
                profile_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ProfileSummary {
                    model: profile.device.model.clone(),
                    sensor_count: profile.sensors.len(),
                    missing_kinds: missing_kinds(&profile),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            profile_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn missing_kinds(profile: &DeviceProfile) -> Vec<SensorKind> {
    SensorKind::ALL
        .iter()
        .copied()
        .filter(|&kind| profile.sensor(kind).is_none())
        .collect()
}

/// Non-fatal profile issues
fn collect_warnings(profile: &DeviceProfile) -> Vec<String> {
    let mut warnings = Vec::new();

    if profile.sensors.is_empty() {
        warnings.push("No sensors declared - every slot will show N/A".to_string());
    }

    for spec in &profile.sensors {
        if spec.max_frequency_hz > 1000.0 {
            warnings.push(format!(
                "Sensor '{}' declares {} Hz - readings will be coalesced on display",
                spec.kind, spec.max_frequency_hz
            ));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Device profile is valid: {}", result.profile_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Model: {}", summary.model);
            println!("  Sensors: {}", summary.sensor_count);
            if !summary.missing_kinds.is_empty() {
                let missing: Vec<&str> =
                    summary.missing_kinds.iter().map(|k| k.as_str()).collect();
                println!("  Not available: {}", missing.join(", "));
            }
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Device profile is invalid: {}", result.profile_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args_for(content: &str) -> (tempfile::NamedTempFile, ValidateArgs) {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        let args = ValidateArgs {
            profile: file.path().to_path_buf(),
            json: true,
        };
        (file, args)
    }

    #[test]
    fn test_valid_profile() {
        let (_file, args) = args_for(
            r#"
[device]
model = "Test Phone"

[[sensors]]
kind = "light"
name = "Ambient Light"
vendor = "Acme"
"#,
        );

        let result = validate_profile(&args);
        assert!(result.valid);
        let summary = result.summary.unwrap();
        assert_eq!(summary.sensor_count, 1);
        assert_eq!(summary.missing_kinds.len(), 18);
        assert!(result.warnings.is_none());
    }

    #[test]
    fn test_duplicate_kind_is_invalid() {
        let (_file, args) = args_for(
            r#"
[device]
model = "Test Phone"

[[sensors]]
kind = "light"
name = "A"
vendor = "Acme"

[[sensors]]
kind = "light"
name = "B"
vendor = "Acme"
"#,
        );

        let result = validate_profile(&args);
        assert!(!result.valid);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_empty_profile_warns() {
        let (_file, args) = args_for("[device]\nmodel = \"Bare\"\n");
        let result = validate_profile(&args);
        assert!(result.valid);
        assert_eq!(result.warnings.unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let args = ValidateArgs {
            profile: "/nonexistent/profile.toml".into(),
            json: false,
        };
        assert!(!validate_profile(&args).valid);
    }
}
