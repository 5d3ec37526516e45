//! Simulated sensor signals
//!
//! Produces plausible raw values for each sensor kind as a function of
//! time since boot, honoring the kind's reporting mode.

use std::f64::consts::PI;

use contracts::{ReportingMode, SensorKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Standard gravity (m/s²)
const GRAVITY: f64 = 9.80665;

/// Seconds between simulated steps
const STEP_INTERVAL_SEC: f64 = 0.5;

/// Time after which significant motion triggers (seconds)
const SIGNIFICANT_MOTION_AFTER_SEC: f64 = 2.0;

/// Per-subscription signal generator
#[derive(Debug)]
pub struct SignalGenerator {
    kind: SensorKind,
    rng: StdRng,
    noise: f32,
    last: Option<Vec<f32>>,
    last_step: u64,
    fired: bool,
}

impl SignalGenerator {
    /// Create generator for a kind
    ///
    /// `noise` is the amplitude of uniform noise added to continuous kinds.
    pub fn new(kind: SensorKind, seed: u64, noise: f32) -> Self {
        Self {
            kind,
            rng: StdRng::seed_from_u64(seed),
            noise: noise.abs(),
            last: None,
            last_step: 0,
            fired: false,
        }
    }

    /// Whether the generator will never produce another value
    pub fn is_exhausted(&self) -> bool {
        self.kind.reporting_mode() == ReportingMode::OneShot && self.fired
    }

    /// Next reading at time `t` (seconds), None if nothing is reported
    pub fn next(&mut self, t: f64) -> Option<Vec<f32>> {
        match self.kind.reporting_mode() {
            ReportingMode::Continuous => {
                let mut values = Self::sample(self.kind, t);
                if self.noise > 0.0 {
                    for v in &mut values {
                        *v += self.rng.random_range(-self.noise..=self.noise);
                    }
                }
                Some(values)
            }
            ReportingMode::OnChange => {
                let values = Self::sample(self.kind, t);
                if self.last.as_ref() == Some(&values) {
                    return None;
                }
                self.last = Some(values.clone());
                Some(values)
            }
            ReportingMode::OneShot => {
                if self.fired || t < SIGNIFICANT_MOTION_AFTER_SEC {
                    return None;
                }
                self.fired = true;
                Some(vec![1.0])
            }
            ReportingMode::Special => {
                let step = step_count(t);
                if step <= self.last_step {
                    return None;
                }
                self.last_step = step;
                Some(vec![1.0])
            }
        }
    }

    /// Noise-free values of a kind at time `t`
    pub fn sample(kind: SensorKind, t: f64) -> Vec<f32> {
        let values: Vec<f64> = match kind {
            SensorKind::Accelerometer => {
                let [gx, gy, gz] = gravity(t);
                let [lx, ly, lz] = linear(t);
                vec![gx + lx, gy + ly, gz + lz]
            }
            SensorKind::Gravity => gravity(t).to_vec(),
            SensorKind::LinearAcceleration => linear(t).to_vec(),
            SensorKind::Gyroscope => gyro(t).to_vec(),
            SensorKind::GyroscopeUncalibrated => {
                let [x, y, z] = gyro(t);
                let bias = [0.0012, -0.0008, 0.0005];
                vec![x + bias[0], y + bias[1], z + bias[2], bias[0], bias[1], bias[2]]
            }
            SensorKind::MagneticField => magnetic(t).to_vec(),
            SensorKind::MagneticFieldUncalibrated => {
                let [x, y, z] = magnetic(t);
                let bias = [12.5, -3.0, 7.25];
                vec![x + bias[0], y + bias[1], z + bias[2], bias[0], bias[1], bias[2]]
            }
            SensorKind::RotationVector | SensorKind::GeomagneticRotationVector => {
                let [x, y, z, w] = orientation(t);
                vec![x, y, z, w, 0.05]
            }
            SensorKind::GameRotationVector => orientation(t).to_vec(),
            SensorKind::Pressure => vec![1013.25 + 0.05 * (0.1 * t).sin()],
            SensorKind::Light => vec![(300.0 + 50.0 * (0.05 * t).sin()).round()],
            SensorKind::Proximity => {
                let near = (t / 10.0) as u64 % 2 == 1;
                vec![if near { 0.0 } else { 5.0 }]
            }
            SensorKind::AmbientTemperature => vec![round_to(22.5 + 0.5 * (0.01 * t).sin(), 10.0)],
            SensorKind::RelativeHumidity => vec![round_to(45.0 + 2.0 * (0.01 * t).sin(), 10.0)],
            SensorKind::HeartRate => vec![(72.0 + 4.0 * (0.1 * t).sin()).round()],
            SensorKind::StepCounter => vec![step_count(t) as f64],
            SensorKind::SignificantMotion | SensorKind::StepDetector => vec![1.0],
        };
        values.into_iter().map(|v| v as f32).collect()
    }
}

fn gravity(t: f64) -> [f64; 3] {
    // Device slowly rocking around the upright position
    let tilt = 0.05 * (0.2 * t).sin();
    [GRAVITY * tilt.sin(), 0.0, GRAVITY * tilt.cos()]
}

fn linear(t: f64) -> [f64; 3] {
    [0.1 * (2.0 * PI * t).sin(), 0.1 * (2.0 * PI * t).cos(), 0.0]
}

fn gyro(t: f64) -> [f64; 3] {
    [0.01 * (0.2 * t).cos(), 0.0, 0.1]
}

fn magnetic(t: f64) -> [f64; 3] {
    let heading = 0.1 * t;
    [22.0 * heading.cos(), -22.0 * heading.sin(), -40.0]
}

/// Unit quaternion (x, y, z, w) for a slow yaw rotation
fn orientation(t: f64) -> [f64; 4] {
    let half_yaw = 0.05 * t;
    [0.0, 0.0, half_yaw.sin(), half_yaw.cos()]
}

fn step_count(t: f64) -> u64 {
    (t.max(0.0) / STEP_INTERVAL_SEC) as u64
}

fn round_to(v: f64, scale: f64) -> f64 {
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_lengths_match_kind() {
        for kind in SensorKind::ALL {
            assert_eq!(
                SignalGenerator::sample(*kind, 1.25).len(),
                kind.value_count(),
                "{kind}"
            );
        }
    }

    #[test]
    fn test_accelerometer_near_gravity() {
        let v = SignalGenerator::sample(SensorKind::Accelerometer, 0.0);
        let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((norm - 9.8).abs() < 0.2);
    }

    #[test]
    fn test_on_change_suppresses_repeats() {
        let mut gen = SignalGenerator::new(SensorKind::HeartRate, 1, 0.0);
        assert!(gen.next(0.0).is_some());
        assert!(gen.next(0.001).is_none());
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut gen = SignalGenerator::new(SensorKind::SignificantMotion, 1, 0.0);
        assert!(gen.next(0.5).is_none());
        assert!(!gen.is_exhausted());
        assert_eq!(gen.next(2.5), Some(vec![1.0]));
        assert!(gen.is_exhausted());
        assert!(gen.next(3.0).is_none());
    }

    #[test]
    fn test_step_detector_one_event_per_step() {
        let mut gen = SignalGenerator::new(SensorKind::StepDetector, 1, 0.0);
        assert!(gen.next(0.1).is_none());
        assert_eq!(gen.next(0.6), Some(vec![1.0]));
        assert!(gen.next(0.7).is_none());
        assert_eq!(gen.next(1.1), Some(vec![1.0]));
    }

    #[test]
    fn test_noise_is_bounded() {
        let mut gen = SignalGenerator::new(SensorKind::Pressure, 7, 0.01);
        let clean = SignalGenerator::sample(SensorKind::Pressure, 3.0)[0];
        for _ in 0..100 {
            let v = gen.next(3.0).unwrap()[0];
            assert!((v - clean).abs() <= 0.02);
        }
    }
}
