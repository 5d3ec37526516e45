//! SensorDisplayScreen - sensor readout screen
//!
//! Owns the per-screen maps (available handles, resolved slots, active
//! subscriptions) and drives them through the screen lifecycle:
//!
//! `Created → initialize → Hidden ⇄ (on_visible / on_hidden) Visible → Destroyed`

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use contracts::{
    Accuracy, DisplaySurface, SamplingRate, SensorHandle, SensorKind, SensorService,
    SharedListener, SlotId, SubscriptionId,
};
use tracing::{debug, info, instrument, trace, warn};

use crate::config::{HandoffMetrics, MetricsSnapshot, ScreenConfig};
use crate::error::{Result, ScreenError};
use crate::format::{format_values, NOT_AVAILABLE};
use crate::handoff::{handoff, UiMessage, UiQueue};

/// Screen lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Constructed, sensors not yet queried
    Created,
    /// Initialized, not subscribed
    Hidden,
    /// Subscribed to every available sensor
    Visible,
    /// Torn down; maps discarded
    Destroyed,
}

impl fmt::Display for ScreenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenState::Created => "created",
            ScreenState::Hidden => "hidden",
            ScreenState::Visible => "visible",
            ScreenState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// Sensor readout screen
///
/// Must be driven from the single UI-owning context: lifecycle calls,
/// `pump` and display access all take `&mut self`. Platform threads only
/// ever see the channel listener.
pub struct SensorDisplayScreen<S: SensorService, D: DisplaySurface> {
    service: S,
    display: D,
    state: ScreenState,

    /// Kind → resolved display slot
    slots: BTreeMap<SensorKind, SlotId>,

    /// Kind → handle, only for kinds present on the device
    handles: BTreeMap<SensorKind, SensorHandle>,

    /// Kind → live subscription
    subscriptions: BTreeMap<SensorKind, SubscriptionId>,

    listener: SharedListener,
    queue: UiQueue,
    metrics: Arc<HandoffMetrics>,
}

impl<S: SensorService, D: DisplaySurface> SensorDisplayScreen<S, D> {
    /// Create screen with default configuration
    pub fn new(service: S, display: D) -> Self {
        Self::with_config(service, display, ScreenConfig::default())
    }

    /// Create screen with custom handoff configuration
    pub fn with_config(service: S, display: D, config: ScreenConfig) -> Self {
        let metrics = Arc::new(HandoffMetrics::new());
        let (listener, queue) = handoff(&config, metrics.clone());

        Self {
            service,
            display,
            state: ScreenState::Created,
            slots: BTreeMap::new(),
            handles: BTreeMap::new(),
            subscriptions: BTreeMap::new(),
            listener: Arc::new(listener),
            queue,
            metrics,
        }
    }

    /// Resolve slots and look up a handle for every supported kind
    ///
    /// Kinds the device lacks show "N/A" from here on.
    #[instrument(name = "screen_initialize", skip(self))]
    pub fn initialize(&mut self) -> Result<()> {
        self.expect_state("initialize", &[ScreenState::Created])?;

        for &kind in SensorKind::ALL {
            let definition = kind.definition();
            let slot = definition.display_slot;

            if !self.display.has_slot(slot) {
                warn!(kind = %kind, slot = %slot, "layout has no slot for sensor");
                continue;
            }
            self.slots.insert(kind, slot);

            match self.service.default_sensor(kind) {
                Some(handle) => {
                    info!(
                        type_name = definition.display_name,
                        name = %handle.name,
                        vendor = %handle.vendor,
                        "sensor detected"
                    );
                    observability::record_sensor_detected(kind.as_str());
                    self.handles.insert(kind, handle);
                }
                None => {
                    warn!(type_name = definition.display_name, "sensor not found");
                    observability::record_sensor_missing(kind.as_str());
                    self.display.set_text(slot, NOT_AVAILABLE);
                }
            }
        }

        info!(
            available = self.handles.len(),
            missing = self.slots.len() - self.handles.len(),
            "screen initialized"
        );
        self.state = ScreenState::Hidden;
        Ok(())
    }

    /// Subscribe to every available sensor at the fastest rate
    ///
    /// Idempotent: kinds that already have a live subscription are skipped,
    /// so calling this twice never doubles delivery.
    #[instrument(name = "screen_on_visible", skip(self))]
    pub fn on_visible(&mut self) -> Result<()> {
        self.expect_state("show", &[ScreenState::Hidden, ScreenState::Visible])?;

        for (&kind, handle) in &self.handles {
            if self.subscriptions.contains_key(&kind) {
                trace!(kind = %kind, "already subscribed");
                continue;
            }

            let subscription = self
                .service
                .subscribe(handle, self.listener.clone(), SamplingRate::Fastest)
                .map_err(|source| ScreenError::Subscribe { kind, source })?;

            debug!(kind = %kind, subscription = %subscription, "subscribed");
            self.subscriptions.insert(kind, subscription);
            observability::record_active_subscriptions(self.subscriptions.len());
        }

        self.state = ScreenState::Visible;
        Ok(())
    }

    /// Cancel every live subscription
    ///
    /// No-op when nothing is subscribed. Every subscription is attempted
    /// even if one fails; the first failure is returned.
    #[instrument(name = "screen_on_hidden", skip(self))]
    pub fn on_hidden(&mut self) -> Result<()> {
        let mut first_error = None;

        for (kind, subscription) in std::mem::take(&mut self.subscriptions) {
            let Some(handle) = self.handles.get(&kind) else {
                continue;
            };
            match self.service.unsubscribe(handle, subscription) {
                Ok(()) => debug!(kind = %kind, subscription = %subscription, "unsubscribed"),
                Err(source) => {
                    warn!(kind = %kind, error = %source, "unsubscribe failed");
                    first_error.get_or_insert(ScreenError::Unsubscribe { kind, source });
                }
            }
        }
        observability::record_active_subscriptions(0);

        if self.state == ScreenState::Visible {
            self.state = ScreenState::Hidden;
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Show a reading in the kind's slot
    ///
    /// No-op for kinds without a slot or without a handle, so an absent
    /// sensor keeps its "N/A".
    pub fn on_reading(&mut self, kind: SensorKind, values: &[f32]) {
        if !self.handles.contains_key(&kind) {
            debug!(kind = %kind, "reading for unavailable sensor ignored");
            return;
        }
        let Some(&slot) = self.slots.get(&kind) else {
            debug!(kind = %kind, "reading for sensor without slot ignored");
            return;
        };

        let text = format_values(values);
        trace!(kind = %kind, text = %text, "reading displayed");
        self.display.set_text(slot, &text);
        self.metrics.record_displayed();
        observability::record_reading_displayed(kind.as_str());
    }

    /// Accuracy changes are not shown
    pub fn on_accuracy_changed(&mut self, kind: SensorKind, accuracy: Accuracy) {
        trace!(kind = %kind, ?accuracy, "accuracy changed");
    }

    /// Apply everything the platform has handed off so far
    ///
    /// Returns the number of messages applied.
    pub fn pump(&mut self) -> usize {
        self.pump_with(|_| {})
    }

    /// Like `pump`, showing each message to `observe` before it is applied
    pub fn pump_with(&mut self, mut observe: impl FnMut(&UiMessage)) -> usize {
        let messages = self.queue.drain();
        let count = messages.len();
        for message in messages {
            observe(&message);
            self.apply(message);
        }
        count
    }

    /// Wait for the next handed-off message and apply it
    ///
    /// Returns false once the screen is destroyed.
    pub async fn pump_next(&mut self) -> bool {
        match self.queue.recv().await {
            Some(message) => {
                self.apply(message);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, message: UiMessage) {
        match message {
            UiMessage::Reading(event) => self.on_reading(event.kind, &event.values),
            UiMessage::AccuracyChanged { kind, accuracy } => {
                self.on_accuracy_changed(kind, accuracy)
            }
        }
    }

    /// Cancel outstanding subscriptions and discard all per-screen maps
    #[instrument(name = "screen_destroy", skip(self))]
    pub fn destroy(&mut self) -> Result<()> {
        if self.state == ScreenState::Destroyed {
            return Ok(());
        }

        let result = self.on_hidden();
        self.queue.close();
        self.handles.clear();
        self.slots.clear();
        self.state = ScreenState::Destroyed;
        info!("screen destroyed");
        result
    }

    /// Current lifecycle state
    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Display surface
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Platform sensor service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Handle recorded for a kind
    pub fn handle(&self, kind: SensorKind) -> Option<&SensorHandle> {
        self.handles.get(&kind)
    }

    /// Kinds present on the device, in table order
    pub fn available_kinds(&self) -> Vec<SensorKind> {
        self.handles.keys().copied().collect()
    }

    /// Kinds with a slot but no sensor, in table order
    pub fn missing_kinds(&self) -> Vec<SensorKind> {
        self.slots
            .keys()
            .filter(|k| !self.handles.contains_key(k))
            .copied()
            .collect()
    }

    /// Number of live subscriptions
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether a kind has a live subscription
    pub fn is_subscribed(&self, kind: SensorKind) -> bool {
        self.subscriptions.contains_key(&kind)
    }

    /// Handoff metrics snapshot
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn expect_state(&self, operation: &'static str, allowed: &[ScreenState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(ScreenError::InvalidTransition {
                operation,
                state: self.state,
            })
        }
    }
}

impl<S: SensorService, D: DisplaySurface> Drop for SensorDisplayScreen<S, D> {
    fn drop(&mut self) {
        if let Err(e) = self.destroy() {
            warn!(error = %e, "screen teardown incomplete");
        }
    }
}
