//! Handoff queue configuration and metrics

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// What to do with a reading when the UI queue is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPolicy {
    /// Evict the oldest queued reading (display stays current)
    #[default]
    DropOldest,
    /// Discard the incoming reading
    DropNewest,
}

/// Screen configuration
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// Capacity of the platform → UI queue
    pub queue_capacity: usize,

    /// Drop policy when full
    pub drop_policy: DropPolicy,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            drop_policy: DropPolicy::DropOldest,
        }
    }
}

impl ScreenConfig {
    /// Create new screen configuration
    pub fn new(queue_capacity: usize, drop_policy: DropPolicy) -> Self {
        Self {
            queue_capacity,
            drop_policy,
        }
    }
}

/// Handoff metrics
#[derive(Debug, Default)]
pub struct HandoffMetrics {
    /// Readings delivered by the platform
    pub readings_received: AtomicU64,

    /// Readings dropped or evicted because the queue was full
    pub readings_dropped: AtomicU64,

    /// Readings written to the display
    pub readings_displayed: AtomicU64,

    /// Queue length at the last drain
    pub queue_len: AtomicUsize,
}

impl HandoffMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record reading received
    pub fn record_received(&self) {
        self.readings_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record reading dropped
    pub fn record_dropped(&self) {
        self.readings_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record reading displayed
    pub fn record_displayed(&self) {
        self.readings_displayed.fetch_add(1, Ordering::Relaxed);
    }

    /// Update queue length
    pub fn update_queue_len(&self, len: usize) {
        self.queue_len.store(len, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            readings_received: self.readings_received.load(Ordering::Relaxed),
            readings_dropped: self.readings_dropped.load(Ordering::Relaxed),
            readings_displayed: self.readings_displayed.load(Ordering::Relaxed),
            queue_len: self.queue_len.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Readings delivered by the platform
    pub readings_received: u64,

    /// Readings dropped or evicted
    pub readings_dropped: u64,

    /// Readings written to the display
    pub readings_displayed: u64,

    /// Queue length at the last drain
    pub queue_len: usize,
}
