//! DeviceProfile - Config Loader output
//!
//! Describes a simulated device: its model and the sensors it carries.

use serde::{Deserialize, Serialize};

use crate::SensorKind;

/// Complete device description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Device identity
    pub device: DeviceInfo,

    /// Sensors physically present on the device
    #[serde(default)]
    pub sensors: Vec<SensorSpec>,
}

/// Device identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Model name (e.g., "Reference Phone")
    pub model: String,

    /// Manufacturer (optional)
    #[serde(default)]
    pub manufacturer: Option<String>,
}

/// One sensor present on the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSpec {
    /// Sensor kind
    pub kind: SensorKind,

    /// Device-reported name
    pub name: String,

    /// Device-reported vendor
    pub vendor: String,

    /// Highest delivery frequency (Hz), within `MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ`
    #[serde(default = "default_max_frequency_hz")]
    pub max_frequency_hz: f64,
}

fn default_max_frequency_hz() -> f64 {
    50.0
}

impl DeviceProfile {
    /// Spec for a kind, if the device has it
    pub fn sensor(&self, kind: SensorKind) -> Option<&SensorSpec> {
        self.sensors.iter().find(|s| s.kind == kind)
    }

    /// Built-in profile of a typical phone
    ///
    /// Has no ambient temperature, relative humidity or heart rate sensor.
    pub fn reference_phone() -> Self {
        let spec = |kind: SensorKind, name: &str, vendor: &str, max_frequency_hz: f64| SensorSpec {
            kind,
            name: name.to_string(),
            vendor: vendor.to_string(),
            max_frequency_hz,
        };

        Self {
            device: DeviceInfo {
                model: "Reference Phone".to_string(),
                manufacturer: Some("Generic".to_string()),
            },
            sensors: vec![
                spec(SensorKind::Accelerometer, "LSM6DSR Accelerometer", "STMicro", 400.0),
                spec(SensorKind::Gyroscope, "LSM6DSR Gyroscope", "STMicro", 400.0),
                spec(
                    SensorKind::GyroscopeUncalibrated,
                    "LSM6DSR Gyroscope-Uncalibrated",
                    "STMicro",
                    400.0,
                ),
                spec(SensorKind::MagneticField, "MMC5603 Magnetometer", "MEMSIC", 100.0),
                spec(
                    SensorKind::MagneticFieldUncalibrated,
                    "MMC5603 Magnetometer-Uncalibrated",
                    "MEMSIC",
                    100.0,
                ),
                spec(SensorKind::Pressure, "BMP390 Pressure", "Bosch", 25.0),
                spec(SensorKind::Light, "TMD3725 Ambient Light", "AMS", 10.0),
                spec(SensorKind::Proximity, "TMD3725 Proximity", "AMS", 5.0),
                spec(SensorKind::Gravity, "Gravity Sensor", "AOSP", 200.0),
                spec(SensorKind::LinearAcceleration, "Linear Acceleration Sensor", "AOSP", 200.0),
                spec(SensorKind::RotationVector, "Rotation Vector Sensor", "AOSP", 200.0),
                spec(SensorKind::GameRotationVector, "Game Rotation Vector Sensor", "AOSP", 200.0),
                spec(
                    SensorKind::GeomagneticRotationVector,
                    "GeoMag Rotation Vector Sensor",
                    "AOSP",
                    100.0,
                ),
                spec(SensorKind::SignificantMotion, "Significant Motion Detector", "AOSP", 1.0),
                spec(SensorKind::StepDetector, "Step Detector", "AOSP", 2.0),
                spec(SensorKind::StepCounter, "Step Counter", "AOSP", 2.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_phone_missing_environmental_sensors() {
        let profile = DeviceProfile::reference_phone();
        assert_eq!(profile.sensors.len(), 16);
        assert!(profile.sensor(SensorKind::AmbientTemperature).is_none());
        assert!(profile.sensor(SensorKind::RelativeHumidity).is_none());
        assert!(profile.sensor(SensorKind::HeartRate).is_none());
        assert!(profile.sensor(SensorKind::Accelerometer).is_some());
    }

    #[test]
    fn test_default_frequency() {
        let json = r#"{
            "device": { "model": "test" },
            "sensors": [ { "kind": "light", "name": "L", "vendor": "V" } ]
        }"#;
        let profile: DeviceProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.sensors[0].max_frequency_hz, 50.0);
        assert!(profile.device.manufacturer.is_none());
    }
}
