//! Platform → UI handoff
//!
//! Platform callbacks arrive on platform-owned threads. `ChannelListener`
//! turns each callback into a `UiMessage` on a bounded queue; the UI-owning
//! context drains it through `UiQueue` and is the only display writer.

use std::sync::Arc;

use async_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use contracts::{Accuracy, SensorEvent, SensorEventListener, SensorHandle, SensorKind};
use tracing::{trace, warn};

use crate::config::{DropPolicy, HandoffMetrics, ScreenConfig};

/// Message handed from the platform to the UI context
#[derive(Debug, Clone, PartialEq)]
pub enum UiMessage {
    /// New reading
    Reading(SensorEvent),
    /// Accuracy change
    AccuracyChanged {
        kind: SensorKind,
        accuracy: Accuracy,
    },
}

/// Listener the platform calls into
///
/// Never touches the display; only enqueues.
pub struct ChannelListener {
    tx: Sender<UiMessage>,
    drop_policy: DropPolicy,
    metrics: Arc<HandoffMetrics>,
}

impl ChannelListener {
    fn send(&self, message: UiMessage) {
        match self.drop_policy {
            DropPolicy::DropOldest => match self.tx.force_send(message) {
                Ok(None) => {}
                Ok(Some(evicted)) => {
                    self.metrics.record_dropped();
                    observability::record_reading_dropped();
                    trace!(?evicted, "queue full, oldest message evicted");
                }
                Err(_) => trace!("ui queue closed"),
            },
            DropPolicy::DropNewest => match self.tx.try_send(message) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    self.metrics.record_dropped();
                    observability::record_reading_dropped();
                    trace!("queue full, message dropped (newest)");
                }
                Err(TrySendError::Closed(_)) => trace!("ui queue closed"),
            },
        }
    }
}

impl SensorEventListener for ChannelListener {
    fn on_reading(&self, event: SensorEvent) {
        self.metrics.record_received();
        self.send(UiMessage::Reading(event));
    }

    fn on_accuracy_changed(&self, handle: &SensorHandle, accuracy: Accuracy) {
        self.send(UiMessage::AccuracyChanged {
            kind: handle.kind,
            accuracy,
        });
    }
}

/// UI side of the handoff queue
pub struct UiQueue {
    rx: Receiver<UiMessage>,
    metrics: Arc<HandoffMetrics>,
}

impl UiQueue {
    /// Drain everything queued so far without blocking
    pub fn drain(&self) -> Vec<UiMessage> {
        let mut messages = Vec::with_capacity(self.rx.len());
        loop {
            match self.rx.try_recv() {
                Ok(message) => messages.push(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Closed) => {
                    warn!("ui queue closed while draining");
                    break;
                }
            }
        }
        self.metrics.update_queue_len(self.rx.len());
        messages
    }

    /// Wait for the next message; None once the queue is closed and empty
    pub async fn recv(&self) -> Option<UiMessage> {
        self.rx.recv().await.ok()
    }

    /// Messages currently queued
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Close the queue; further sends are discarded
    pub fn close(&self) {
        self.rx.close();
    }
}

/// Create a connected listener / queue pair
pub fn handoff(config: &ScreenConfig, metrics: Arc<HandoffMetrics>) -> (ChannelListener, UiQueue) {
    let (tx, rx) = bounded(config.queue_capacity.max(1));
    (
        ChannelListener {
            tx,
            drop_policy: config.drop_policy,
            metrics: metrics.clone(),
        },
        UiQueue { rx, metrics },
    )
}
