//! SensorKind - the fixed sensor table
//!
//! Every supported kind maps to a compile-time constant definition: the
//! platform type string shown as its name and the display slot it owns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Opaque identifier of a pre-declared text slot on the screen layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(&'static str);

impl SlotId {
    /// Layout identifier of the slot
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// How the platform delivers readings for a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingMode {
    /// Emits at the requested rate
    Continuous,
    /// Emits only when the value changes
    OnChange,
    /// Emits once, then disarms
    OneShot,
    /// Emits on a sensor-specific trigger (e.g. a detected step)
    Special,
}

/// Immutable definition of one supported sensor kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorKindDefinition {
    /// Human-readable name (platform type string)
    pub display_name: &'static str,
    /// Slot the latest reading is written into
    pub display_slot: SlotId,
}

/// Define the `SensorKind` enum together with its constant table
///
/// Each row: variant, config key, platform type id, value count, reporting mode.
macro_rules! define_sensor_kinds {
    (
        $(
            $variant:ident => $key:literal, $type_id:literal, $values:literal, $mode:ident;
        )+
    ) => {
        /// Supported sensor kinds
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum SensorKind {
            $($variant,)+
        }

        impl SensorKind {
            /// All supported kinds, in table order
            pub const ALL: &'static [SensorKind] = &[$(SensorKind::$variant,)+];

            /// Snake-case key used in configuration and logs
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(SensorKind::$variant => $key,)+
                }
            }

            /// Constant definition for this kind
            pub const fn definition(self) -> SensorKindDefinition {
                match self {
                    $(SensorKind::$variant => SensorKindDefinition {
                        display_name: concat!("android.sensor.", $key),
                        display_slot: SlotId(concat!("text_view_", $key)),
                    },)+
                }
            }

            /// Numeric type id the platform assigns to this kind
            pub const fn platform_type(self) -> u32 {
                match self {
                    $(SensorKind::$variant => $type_id,)+
                }
            }

            /// Number of values in each reading
            pub const fn value_count(self) -> usize {
                match self {
                    $(SensorKind::$variant => $values,)+
                }
            }

            /// Delivery behavior of this kind
            pub const fn reporting_mode(self) -> ReportingMode {
                match self {
                    $(SensorKind::$variant => ReportingMode::$mode,)+
                }
            }
        }

        impl FromStr for SensorKind {
            type Err = ContractError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok(SensorKind::$variant),)+
                    other => Err(ContractError::UnknownSensorKind {
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

define_sensor_kinds! {
    Accelerometer => "accelerometer", 1, 3, Continuous;
    AmbientTemperature => "ambient_temperature", 13, 1, OnChange;
    GameRotationVector => "game_rotation_vector", 15, 4, Continuous;
    GeomagneticRotationVector => "geomagnetic_rotation_vector", 20, 5, Continuous;
    Gravity => "gravity", 9, 3, Continuous;
    Gyroscope => "gyroscope", 4, 3, Continuous;
    GyroscopeUncalibrated => "gyroscope_uncalibrated", 16, 6, Continuous;
    HeartRate => "heart_rate", 21, 1, OnChange;
    Light => "light", 5, 1, OnChange;
    LinearAcceleration => "linear_acceleration", 10, 3, Continuous;
    MagneticField => "magnetic_field", 2, 3, Continuous;
    MagneticFieldUncalibrated => "magnetic_field_uncalibrated", 14, 6, Continuous;
    Pressure => "pressure", 6, 1, Continuous;
    Proximity => "proximity", 8, 1, OnChange;
    RelativeHumidity => "relative_humidity", 12, 1, OnChange;
    RotationVector => "rotation_vector", 11, 5, Continuous;
    SignificantMotion => "significant_motion", 17, 1, OneShot;
    StepCounter => "step_counter", 19, 1, OnChange;
    StepDetector => "step_detector", 18, 1, Special;
}

impl SensorKind {
    /// Human-readable name
    pub const fn display_name(self) -> &'static str {
        self.definition().display_name
    }

    /// Display slot
    pub const fn slot(self) -> SlotId {
        self.definition().display_slot
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
