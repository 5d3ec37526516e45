//! `run` command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use screen::{DropPolicy, ScreenConfig};
use tracing::info;

use super::load_profile;
use crate::cli::RunArgs;
use crate::host::{Session, SessionConfig};

/// Execute the `run` command
pub async fn run_screen(args: &RunArgs) -> Result<()> {
    let profile = load_profile(args.profile.as_deref()).context("Failed to load profile")?;

    info!(
        model = %profile.device.model,
        sensors = profile.sensors.len(),
        "Device profile loaded"
    );

    let session_config = SessionConfig {
        profile,
        duration: non_zero(args.duration).map(Duration::from_secs),
        refresh: Duration::from_millis(args.refresh_ms.max(1)),
        toggle_every: non_zero(args.toggle_secs).map(Duration::from_secs),
        screen: ScreenConfig::new(args.queue_capacity, DropPolicy::DropOldest),
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
        render: !args.no_render,
    };

    info!("Starting sensor screen...");

    let stats = Session::new(session_config)
        .run(shutdown_signal())
        .await
        .context("Sensor screen failed")?;

    info!(
        refreshes = stats.refreshes,
        displayed = stats.handoff.readings_displayed,
        duration_secs = stats.duration.as_secs_f64(),
        rate = format!("{:.2}", stats.readings_per_sec()),
        "Sensor screen finished"
    );
    stats.print_summary();

    Ok(())
}

fn non_zero(value: u64) -> Option<u64> {
    (value != 0).then_some(value)
}

/// Ctrl+C and SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
