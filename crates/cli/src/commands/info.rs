//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{DeviceProfile, ReportingMode, SensorKind};
use serde::Serialize;
use tracing::info;

use super::load_profile;
use crate::cli::InfoArgs;

/// Sensor table for JSON output
#[derive(Serialize)]
struct BoardInfo {
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    manufacturer: Option<String>,
    available: usize,
    sensors: Vec<KindInfo>,
}

#[derive(Serialize)]
struct KindInfo {
    kind: SensorKind,
    display_name: &'static str,
    slot: &'static str,
    platform_type: u32,
    value_count: usize,
    reporting_mode: ReportingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<DeviceSensorInfo>,
}

#[derive(Serialize)]
struct DeviceSensorInfo {
    name: String,
    vendor: String,
    max_frequency_hz: f64,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let profile = load_profile(args.profile.as_deref()).context("Failed to load profile")?;
    info!(model = %profile.device.model, "Listing sensor kinds");

    let board = build_board_info(&profile);
    if args.json {
        let json =
            serde_json::to_string_pretty(&board).context("Failed to serialize sensor info")?;
        println!("{}", json);
    } else {
        print_board_info(&board);
    }

    Ok(())
}

fn build_board_info(profile: &DeviceProfile) -> BoardInfo {
    let sensors: Vec<KindInfo> = SensorKind::ALL
        .iter()
        .map(|&kind| KindInfo {
            kind,
            display_name: kind.display_name(),
            slot: kind.slot().as_str(),
            platform_type: kind.platform_type(),
            value_count: kind.value_count(),
            reporting_mode: kind.reporting_mode(),
            device: profile.sensor(kind).map(|spec| DeviceSensorInfo {
                name: spec.name.clone(),
                vendor: spec.vendor.clone(),
                max_frequency_hz: spec.max_frequency_hz,
            }),
        })
        .collect();

    BoardInfo {
        model: profile.device.model.clone(),
        manufacturer: profile.device.manufacturer.clone(),
        available: sensors.iter().filter(|s| s.device.is_some()).count(),
        sensors,
    }
}

fn print_board_info(board: &BoardInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Sensor Board Kinds                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📱 Device");
    match &board.manufacturer {
        Some(manufacturer) => {
            println!("   ├─ Model: {}", board.model);
            println!("   └─ Manufacturer: {}", manufacturer);
        }
        None => println!("   └─ Model: {}", board.model),
    }

    println!(
        "\n📡 Sensors ({} of {} available)",
        board.available,
        board.sensors.len()
    );
    for (i, sensor) in board.sensors.iter().enumerate() {
        let is_last = i == board.sensors.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        println!(
            "   {} {} (type {}, {} values, {:?})",
            prefix,
            sensor.display_name,
            sensor.platform_type,
            sensor.value_count,
            sensor.reporting_mode
        );
        match &sensor.device {
            Some(device) => println!(
                "   {}  └─ {} / {} @ {} Hz",
                child_prefix, device.name, device.vendor, device.max_frequency_hz
            ),
            None => println!("   {}  └─ N/A", child_prefix),
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_info_marks_missing_kinds() {
        let board = build_board_info(&DeviceProfile::reference_phone());
        assert_eq!(board.sensors.len(), 19);
        assert_eq!(board.available, 16);

        let heart_rate = board
            .sensors
            .iter()
            .find(|s| s.kind == SensorKind::HeartRate)
            .unwrap();
        assert!(heart_rate.device.is_none());
        assert_eq!(heart_rate.slot, "text_view_heart_rate");
    }

    #[test]
    fn test_board_info_json() {
        let board = build_board_info(&DeviceProfile::reference_phone());
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["sensors"][0]["kind"], "accelerometer");
        assert_eq!(json["sensors"][0]["reporting_mode"], "continuous");
        assert_eq!(json["sensors"][0]["display_name"], "android.sensor.accelerometer");
    }
}
