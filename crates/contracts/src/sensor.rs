//! Sensor handles, readings and subscription tokens
//!
//! Types exchanged between the platform sensor service and its listeners.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SensorKind;

/// Platform-assigned handle identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandleId(pub u32);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to one physical or virtual sensor on the device
///
/// Handed out by the platform; the screen only reads it and passes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorHandle {
    /// Platform-assigned id
    pub id: HandleId,

    /// Sensor kind
    pub kind: SensorKind,

    /// Device-reported sensor name
    pub name: String,

    /// Device-reported vendor
    pub vendor: String,

    /// Highest delivery frequency the sensor supports (Hz)
    pub max_frequency_hz: f64,
}

/// Subscription token returned by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Reading accuracy reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    /// Sensor not in contact with what it measures
    NoContact,
    /// Values cannot be trusted
    Unreliable,
    Low,
    Medium,
    #[default]
    High,
}

/// One reading delivered by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    /// Handle that produced the reading
    pub handle_id: HandleId,

    /// Sensor kind
    pub kind: SensorKind,

    /// Raw values; length depends on the kind
    pub values: Vec<f32>,

    /// Monotonic timestamp (nanoseconds)
    pub timestamp_ns: u64,

    /// Accuracy at the time of the reading
    pub accuracy: Accuracy,
}

/// Requested delivery rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingRate {
    /// As fast as the sensor allows
    #[default]
    Fastest,
    /// Suitable for games
    Game,
    /// Suitable for the user interface
    Ui,
    /// Suitable for screen orientation changes
    Normal,
}

impl SamplingRate {
    /// Requested delay between readings (microseconds); 0 means no delay
    pub const fn delay_us(self) -> u64 {
        match self {
            SamplingRate::Fastest => 0,
            SamplingRate::Game => 20_000,
            SamplingRate::Ui => 66_667,
            SamplingRate::Normal => 200_000,
        }
    }

    /// Effective delivery period for a sensor with the given maximum frequency
    ///
    /// Never faster than the sensor supports. The frequency is clamped to
    /// `[MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ]`; an unusable one (NaN, <= 0)
    /// counts as the maximum, so the period is always at least `MIN_PERIOD`.
    pub fn period(self, max_frequency_hz: f64) -> Duration {
        let requested = Duration::from_micros(self.delay_us());
        let hz = if max_frequency_hz > 0.0 && !max_frequency_hz.is_nan() {
            max_frequency_hz.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ)
        } else {
            MAX_FREQUENCY_HZ
        };
        let fastest = Duration::try_from_secs_f64(1.0 / hz).unwrap_or(MIN_PERIOD);
        requested.max(fastest).max(MIN_PERIOD)
    }
}

/// Lowest supported sensor frequency (Hz)
pub const MIN_FREQUENCY_HZ: f64 = 0.001;

/// Highest supported sensor frequency (Hz)
pub const MAX_FREQUENCY_HZ: f64 = 1_000_000.0;

/// Shortest delivery period
pub const MIN_PERIOD: Duration = Duration::from_micros(1);

/// Whether a sensor frequency is inside the supported range
pub fn is_supported_frequency(hz: f64) -> bool {
    (MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&hz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fastest_uses_sensor_limit() {
        assert_eq!(
            SamplingRate::Fastest.period(100.0),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn test_slow_rate_wins_over_fast_sensor() {
        assert_eq!(
            SamplingRate::Normal.period(400.0),
            Duration::from_millis(200)
        );
        assert_eq!(SamplingRate::Game.period(10.0), Duration::from_millis(100));
    }

    #[test]
    fn test_invalid_frequency_falls_back_to_requested_delay() {
        assert_eq!(SamplingRate::Fastest.period(0.0), MIN_PERIOD);
        assert_eq!(
            SamplingRate::Ui.period(f64::NAN),
            Duration::from_micros(66_667)
        );
    }

    #[test]
    fn test_tiny_frequency_does_not_overflow() {
        assert_eq!(
            SamplingRate::Fastest.period(1e-20),
            Duration::from_secs(1000)
        );
        assert_eq!(
            SamplingRate::Fastest.period(f64::MIN_POSITIVE),
            Duration::from_secs(1000)
        );
    }

    #[test]
    fn test_huge_frequency_keeps_minimum_period() {
        assert_eq!(SamplingRate::Fastest.period(1e12), MIN_PERIOD);
        assert_eq!(SamplingRate::Fastest.period(f64::INFINITY), MIN_PERIOD);
    }

    #[test]
    fn test_supported_frequency_range() {
        assert!(is_supported_frequency(MIN_FREQUENCY_HZ));
        assert!(is_supported_frequency(400.0));
        assert!(!is_supported_frequency(1e-20));
        assert!(!is_supported_frequency(1e12));
        assert!(!is_supported_frequency(f64::NAN));
    }

    #[test]
    fn test_display() {
        assert_eq!(HandleId(3).to_string(), "#3");
        assert_eq!(SubscriptionId(7).to_string(), "sub-7");
    }
}
