//! Simulated sensor service
//!
//! Implements `SensorService` over a `DeviceProfile`. Each subscription runs
//! an emitter on its own background thread, so readings reach listeners off
//! the caller's thread, the same way a real device delivers them.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use contracts::{
    is_supported_frequency, Accuracy, ContractError, DeviceProfile, HandleId, SamplingRate,
    SensorEvent, SensorHandle, SensorKind, SensorService, SharedListener, SubscriptionId,
};
use tracing::{debug, instrument, trace, warn};

use crate::error::{PlatformError, Result};
use crate::signal::SignalGenerator;

/// Simulation tuning
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Uniform noise amplitude added to continuous sensors
    pub noise: f32,
    /// Seed for the noise generators
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            noise: 0.01,
            seed: 0x5EED,
        }
    }
}

/// Running emitter of one subscription
struct Emitter {
    kind: SensorKind,
    running: Arc<AtomicBool>,
}

/// Simulated device sensors
pub struct SimulatedSensorService {
    model: String,
    handles: HashMap<SensorKind, SensorHandle>,
    config: SimulationConfig,
    boot: Instant,
    next_subscription: AtomicU64,
    emitters: Mutex<HashMap<SubscriptionId, Emitter>>,
}

impl SimulatedSensorService {
    /// Create service for the sensors of a profile
    pub fn new(profile: &DeviceProfile) -> Result<Self> {
        Self::with_config(profile, SimulationConfig::default())
    }

    /// Create service with custom simulation tuning
    pub fn with_config(profile: &DeviceProfile, config: SimulationConfig) -> Result<Self> {
        let mut handles = HashMap::new();
        let mut seen = HashSet::new();

        for (idx, spec) in profile.sensors.iter().enumerate() {
            if !seen.insert(spec.kind) {
                return Err(PlatformError::DuplicateSensor { kind: spec.kind });
            }
            if !is_supported_frequency(spec.max_frequency_hz) {
                return Err(PlatformError::InvalidFrequency {
                    kind: spec.kind,
                    value: spec.max_frequency_hz,
                });
            }
            handles.insert(
                spec.kind,
                SensorHandle {
                    id: HandleId(idx as u32 + 1),
                    kind: spec.kind,
                    name: spec.name.clone(),
                    vendor: spec.vendor.clone(),
                    max_frequency_hz: spec.max_frequency_hz,
                },
            );
        }

        debug!(
            model = %profile.device.model,
            sensors = handles.len(),
            "simulated device ready"
        );

        Ok(Self {
            model: profile.device.model.clone(),
            handles,
            config,
            boot: Instant::now(),
            next_subscription: AtomicU64::new(1),
            emitters: Mutex::new(HashMap::new()),
        })
    }

    /// Device model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of live subscriptions
    pub fn active_subscriptions(&self) -> usize {
        self.emitters.lock().unwrap().len()
    }

    /// Number of live subscriptions for one kind
    pub fn active_subscriptions_for(&self, kind: SensorKind) -> usize {
        self.emitters
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.kind == kind)
            .count()
    }

    fn owns(&self, handle: &SensorHandle) -> bool {
        self.handles
            .get(&handle.kind)
            .is_some_and(|h| h.id == handle.id)
    }

    fn spawn_emitter(
        &self,
        subscription: SubscriptionId,
        handle: SensorHandle,
        listener: SharedListener,
        period: Duration,
        running: Arc<AtomicBool>,
    ) -> Result<()> {
        let kind = handle.kind;
        let boot = self.boot;
        let mut generator = SignalGenerator::new(
            kind,
            self.config.seed ^ subscription.0,
            self.config.noise,
        );

        thread::Builder::new()
            .name(format!("sensor-{kind}"))
            .spawn(move || {
                debug!(
                    kind = %kind,
                    subscription = %subscription,
                    period_us = period.as_micros() as u64,
                    "emitter started"
                );

                listener.on_accuracy_changed(&handle, Accuracy::High);

                while running.load(Ordering::Relaxed) {
                    let elapsed = boot.elapsed();
                    if let Some(values) = generator.next(elapsed.as_secs_f64()) {
                        // Best effort: a reading already past this check can still
                        // arrive after unsubscribe returns
                        if !running.load(Ordering::Acquire) {
                            break;
                        }
                        trace!(kind = %kind, ?values, "reading emitted");
                        listener.on_reading(SensorEvent {
                            handle_id: handle.id,
                            kind,
                            values,
                            timestamp_ns: elapsed.as_nanos() as u64,
                            accuracy: Accuracy::High,
                        });
                    }

                    if generator.is_exhausted() {
                        debug!(kind = %kind, "one-shot sensor disarmed");
                        break;
                    }

                    thread::sleep(period);
                }

                debug!(kind = %kind, subscription = %subscription, "emitter stopped");
            })
            .map_err(|source| PlatformError::EmitterSpawn { kind, source })?;

        Ok(())
    }
}

impl SensorService for SimulatedSensorService {
    fn default_sensor(&self, kind: SensorKind) -> Option<SensorHandle> {
        self.handles.get(&kind).cloned()
    }

    #[instrument(
        name = "simulated_subscribe",
        skip(self, handle, listener),
        fields(kind = %handle.kind, rate = ?rate)
    )]
    fn subscribe(
        &self,
        handle: &SensorHandle,
        listener: SharedListener,
        rate: SamplingRate,
    ) -> std::result::Result<SubscriptionId, ContractError> {
        if !self.owns(handle) {
            warn!(kind = %handle.kind, handle = %handle.id, "subscribe for foreign handle");
            return Err(ContractError::SensorUnavailable { kind: handle.kind });
        }

        let subscription = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        let running = Arc::new(AtomicBool::new(true));
        let period = rate.period(handle.max_frequency_hz);

        self.spawn_emitter(
            subscription,
            handle.clone(),
            listener,
            period,
            running.clone(),
        )?;

        self.emitters.lock().unwrap().insert(
            subscription,
            Emitter {
                kind: handle.kind,
                running,
            },
        );

        Ok(subscription)
    }

    #[instrument(
        name = "simulated_unsubscribe",
        skip(self, handle),
        fields(kind = %handle.kind, subscription = %subscription)
    )]
    fn unsubscribe(
        &self,
        handle: &SensorHandle,
        subscription: SubscriptionId,
    ) -> std::result::Result<(), ContractError> {
        let emitter = self
            .emitters
            .lock()
            .unwrap()
            .remove(&subscription)
            .ok_or(ContractError::UnknownSubscription {
                kind: handle.kind,
                id: subscription,
            })?;

        emitter.running.store(false, Ordering::Release);
        Ok(())
    }
}

impl Drop for SimulatedSensorService {
    fn drop(&mut self) {
        let emitters = match self.emitters.get_mut() {
            Ok(emitters) => emitters,
            Err(poisoned) => poisoned.into_inner(),
        };
        for emitter in emitters.values() {
            emitter.running.store(false, Ordering::Release);
        }
        emitters.clear();
    }
}
