//! Session - drives the screen lifecycle from the terminal.
//!
//! The tokio task running `Session::run` is the single UI-owning context:
//! it alone pumps the handoff queue and writes the panel.

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::Context;
use contracts::DeviceProfile;
use platform::SimulatedSensorService;
use screen::{ScreenConfig, ScreenState, SensorDisplayScreen, TextPanel, UiMessage};
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{info, warn};

use super::SessionStats;
use crate::error::Result;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Simulated device
    pub profile: DeviceProfile,

    /// Run time (None = until shutdown signal)
    pub duration: Option<Duration>,

    /// Display refresh interval
    pub refresh: Duration,

    /// Visibility toggle interval (None = stay visible)
    pub toggle_every: Option<Duration>,

    /// Handoff queue tuning
    pub screen: ScreenConfig,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,

    /// Redraw the panel on every refresh
    pub render: bool,
}

/// Terminal session hosting one sensor screen
pub struct Session {
    config: SessionConfig,
}

impl Session {
    /// Create a new session with the given configuration
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Run until the configured duration elapses or `shutdown` resolves
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<SessionStats> {
        let start_time = Instant::now();

        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)
                .context("Failed to start metrics endpoint")?;
            info!("Metrics endpoint available on port {}", port);
        }

        let service = SimulatedSensorService::new(&self.config.profile)?;
        info!(model = %service.model(), "Simulated sensor platform ready");

        let mut screen = SensorDisplayScreen::with_config(
            service,
            TextPanel::sensor_layout(),
            self.config.screen.clone(),
        );
        screen.initialize()?;
        screen.on_visible()?;

        let mut stats = SessionStats {
            model: self.config.profile.device.model.clone(),
            available: screen.available_kinds(),
            missing: screen.missing_kinds(),
            ..Default::default()
        };

        info!(
            available = stats.available.len(),
            missing = stats.missing.len(),
            "Screen visible"
        );

        let mut refresh = time::interval(self.config.refresh);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut toggle = self.config.toggle_every.map(|every| {
            let mut interval = time::interval_at(time::Instant::now() + every, every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        let deadline = sleep_or_pending(self.config.duration);
        tokio::pin!(deadline);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = refresh.tick() => {
                    let applied = screen.pump_with(|message| {
                        if let UiMessage::Reading(event) = message {
                            stats.readings.update(event);
                        }
                    });
                    observability::record_pump_batch(applied);
                    stats.refreshes += 1;

                    if self.config.render {
                        redraw(screen.display());
                    }
                }
                _ = tick_or_pending(&mut toggle) => {
                    if screen.state() == ScreenState::Visible {
                        screen.on_hidden()?;
                        info!("Screen hidden");
                    } else {
                        screen.on_visible()?;
                        info!("Screen visible");
                    }
                    stats.toggles += 1;
                }
                _ = &mut deadline => {
                    info!("Session duration reached");
                    break;
                }
                _ = &mut shutdown => {
                    warn!("Received shutdown signal, closing screen...");
                    break;
                }
            }
        }

        screen.on_hidden()?;
        screen.pump_with(|message| {
            if let UiMessage::Reading(event) = message {
                stats.readings.update(event);
            }
        });
        if self.config.render {
            redraw(screen.display());
        }
        screen.destroy()?;

        stats.handoff = screen.metrics();
        stats.readings.set_dropped(stats.handoff.readings_dropped);
        stats.duration = start_time.elapsed();

        info!(
            duration_secs = stats.duration.as_secs_f64(),
            displayed = stats.handoff.readings_displayed,
            dropped = stats.handoff.readings_dropped,
            "Session complete"
        );

        Ok(stats)
    }
}

async fn sleep_or_pending(duration: Option<Duration>) {
    match duration {
        Some(duration) => time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

async fn tick_or_pending(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn redraw(panel: &TextPanel) {
    // Clear and home the cursor
    print!("\x1B[2J\x1B[H{}", panel.render());
}
