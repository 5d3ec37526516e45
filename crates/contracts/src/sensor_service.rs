//! SensorService trait - platform sensor service abstraction
//!
//! Decouples the screen from the concrete sensor platform. The simulated
//! device and the test mock implement the same API.

use std::sync::Arc;

use crate::{Accuracy, ContractError, SamplingRate, SensorEvent, SensorHandle, SensorKind, SubscriptionId};

/// Capability the platform calls back into
///
/// Callbacks may arrive on any platform-owned thread, so implementations
/// must not touch UI state directly.
pub trait SensorEventListener: Send + Sync {
    /// A new reading is available
    fn on_reading(&self, event: SensorEvent);

    /// Accuracy of a subscribed sensor changed
    fn on_accuracy_changed(&self, handle: &SensorHandle, accuracy: Accuracy);
}

/// Listener shared between the screen and the platform
pub type SharedListener = Arc<dyn SensorEventListener>;

/// Platform sensor service
///
/// # Example
///
/// ```ignore
/// if let Some(handle) = service.default_sensor(SensorKind::Light) {
///     let sub = service.subscribe(&handle, listener.clone(), SamplingRate::Fastest)?;
///     // ... readings arrive on listener ...
///     service.unsubscribe(&handle, sub)?;
/// }
/// ```
pub trait SensorService: Send + Sync {
    /// Default sensor of the given kind, None if the device has none
    fn default_sensor(&self, kind: SensorKind) -> Option<SensorHandle>;

    /// Start delivering readings of `handle` to `listener`
    ///
    /// Subscriptions are additive: subscribing twice delivers every reading twice.
    fn subscribe(
        &self,
        handle: &SensorHandle,
        listener: SharedListener,
        rate: SamplingRate,
    ) -> Result<SubscriptionId, ContractError>;

    /// Stop a subscription previously returned by `subscribe`
    fn unsubscribe(
        &self,
        handle: &SensorHandle,
        subscription: SubscriptionId,
    ) -> Result<(), ContractError>;
}

impl<S: SensorService + ?Sized> SensorService for Arc<S> {
    fn default_sensor(&self, kind: SensorKind) -> Option<SensorHandle> {
        (**self).default_sensor(kind)
    }

    fn subscribe(
        &self,
        handle: &SensorHandle,
        listener: SharedListener,
        rate: SamplingRate,
    ) -> Result<SubscriptionId, ContractError> {
        (**self).subscribe(handle, listener, rate)
    }

    fn unsubscribe(
        &self,
        handle: &SensorHandle,
        subscription: SubscriptionId,
    ) -> Result<(), ContractError> {
        (**self).unsubscribe(handle, subscription)
    }
}
