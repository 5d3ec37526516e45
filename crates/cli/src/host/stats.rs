//! Session statistics.

use std::time::Duration;

use contracts::SensorKind;
use observability::ReadingStatsAggregator;
use screen::MetricsSnapshot;

/// Statistics from a screen session
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Device model the session ran against
    pub model: String,

    /// Kinds with a live handle
    pub available: Vec<SensorKind>,

    /// Kinds showing "N/A"
    pub missing: Vec<SensorKind>,

    /// Display refreshes performed
    pub refreshes: u64,

    /// Hidden/visible toggles performed
    pub toggles: u64,

    /// Total duration of the session
    pub duration: Duration,

    /// Handoff queue counters
    pub handoff: MetricsSnapshot,

    /// Per-kind reading statistics
    pub readings: ReadingStatsAggregator,
}

impl SessionStats {
    /// Readings displayed per second
    pub fn readings_per_sec(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.handoff.readings_displayed as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Session Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Device: {}", self.model);
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Refreshes: {}", self.refreshes);
        println!("   ├─ Visibility toggles: {}", self.toggles);
        println!("   ├─ Sensors available: {}", self.available.len());
        println!("   └─ Sensors missing: {}", self.missing.len());

        println!("\n📈 Handoff");
        println!("   ├─ Received: {}", self.handoff.readings_received);
        println!("   ├─ Displayed: {}", self.handoff.readings_displayed);
        println!("   ├─ Dropped: {}", self.handoff.readings_dropped);
        println!("   └─ Readings/s: {:.2}", self.readings_per_sec());

        if !self.missing.is_empty() {
            println!("\n⚠️  Not Available");
            for (i, kind) in self.missing.iter().enumerate() {
                let prefix = if i == self.missing.len() - 1 { "└─" } else { "├─" };
                println!("   {} {}", prefix, kind.display_name());
            }
        }

        println!("\n{}", self.readings.summary());
    }
}
