//! 配置校验模块
//!
//! 校验规则：
//! - device.model 非空
//! - sensor kind 唯一 (每种类型只有一个默认传感器)
//! - name / vendor 非空
//! - max_frequency_hz 在 [MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ] 范围内

use std::collections::HashSet;

use contracts::{
    is_supported_frequency, ContractError, DeviceProfile, MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ,
};

/// 校验 DeviceProfile 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(profile: &DeviceProfile) -> Result<(), ContractError> {
    validate_device(profile)?;
    validate_sensor_kinds(profile)?;
    validate_sensor_identity(profile)?;
    validate_sensor_frequencies(profile)?;
    Ok(())
}

fn validate_device(profile: &DeviceProfile) -> Result<(), ContractError> {
    if profile.device.model.trim().is_empty() {
        return Err(ContractError::config_validation(
            "device.model",
            "model cannot be empty",
        ));
    }
    Ok(())
}

/// 校验 sensor kind 唯一性
fn validate_sensor_kinds(profile: &DeviceProfile) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for sensor in &profile.sensors {
        if !seen.insert(sensor.kind) {
            return Err(ContractError::config_validation(
                format!("sensors[kind={}]", sensor.kind),
                "duplicate sensor kind",
            ));
        }
    }
    Ok(())
}

fn validate_sensor_identity(profile: &DeviceProfile) -> Result<(), ContractError> {
    for sensor in &profile.sensors {
        if sensor.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("sensors[{}].name", sensor.kind),
                "sensor name cannot be empty",
            ));
        }
        if sensor.vendor.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("sensors[{}].vendor", sensor.kind),
                "sensor vendor cannot be empty",
            ));
        }
    }
    Ok(())
}

/// 校验传感器最高频率
fn validate_sensor_frequencies(profile: &DeviceProfile) -> Result<(), ContractError> {
    for sensor in &profile.sensors {
        if !is_supported_frequency(sensor.max_frequency_hz) {
            return Err(ContractError::config_validation(
                format!("sensors[{}].max_frequency_hz", sensor.kind),
                format!(
                    "max_frequency_hz must be within {}..={} Hz, got {}",
                    MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ, sensor.max_frequency_hz
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{SensorKind, SensorSpec};

    fn minimal_profile() -> DeviceProfile {
        let mut profile = DeviceProfile::reference_phone();
        profile.sensors.truncate(2);
        profile
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&minimal_profile()).is_ok());
        assert!(validate(&DeviceProfile::reference_phone()).is_ok());
    }

    #[test]
    fn test_empty_sensor_list_is_valid() {
        let mut profile = minimal_profile();
        profile.sensors.clear();
        assert!(validate(&profile).is_ok());
    }

    #[test]
    fn test_empty_model() {
        let mut profile = minimal_profile();
        profile.device.model = "  ".into();
        let err = validate(&profile).unwrap_err();
        assert!(err.to_string().contains("device.model"));
    }

    #[test]
    fn test_duplicate_kind() {
        let mut profile = minimal_profile();
        profile.sensors.push(SensorSpec {
            kind: SensorKind::Accelerometer,
            name: "Second Accelerometer".into(),
            vendor: "Other".into(),
            max_frequency_hz: 100.0,
        });
        let err = validate(&profile).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_vendor() {
        let mut profile = minimal_profile();
        profile.sensors[1].vendor = String::new();
        let err = validate(&profile).unwrap_err();
        assert!(err.to_string().contains("vendor"));
    }

    #[test]
    fn test_invalid_frequency() {
        let mut profile = minimal_profile();
        profile.sensors[0].max_frequency_hz = 0.0;
        let err = validate(&profile).unwrap_err();
        assert!(err.to_string().contains("max_frequency_hz"));

        profile.sensors[0].max_frequency_hz = f64::INFINITY;
        assert!(validate(&profile).is_err());
    }

    #[test]
    fn test_frequency_outside_supported_range() {
        let mut profile = minimal_profile();

        profile.sensors[0].max_frequency_hz = 1e-20;
        let err = validate(&profile).unwrap_err();
        assert!(err.to_string().contains("max_frequency_hz"));

        profile.sensors[0].max_frequency_hz = 1e12;
        assert!(validate(&profile).is_err());

        profile.sensors[0].max_frequency_hz = f64::NAN;
        assert!(validate(&profile).is_err());

        profile.sensors[0].max_frequency_hz = MIN_FREQUENCY_HZ;
        assert!(validate(&profile).is_ok());
        profile.sensors[0].max_frequency_hz = MAX_FREQUENCY_HZ;
        assert!(validate(&profile).is_ok());
    }
}
