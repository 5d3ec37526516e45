//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 模拟 e2e 测试：设备配置 → 模拟平台 → 屏幕 → 面板

#[cfg(test)]
mod contract_tests {
    use contracts::{ReportingMode, SensorKind};

    #[test]
    fn test_sensor_table_snapshot() {
        assert_eq!(SensorKind::ALL.len(), 19);

        let first = SensorKind::ALL[0];
        assert_eq!(first.display_name(), "android.sensor.accelerometer");
        assert_eq!(first.slot().as_str(), "text_view_accelerometer");
        assert_eq!(first.value_count(), 3);

        assert_eq!(
            SensorKind::SignificantMotion.reporting_mode(),
            ReportingMode::OneShot
        );
        assert_eq!(SensorKind::RotationVector.value_count(), 5);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{DeviceProfile, SensorKind};
    use observability::ReadingStatsAggregator;
    use platform::SimulatedSensorService;
    use screen::{
        DropPolicy, ScreenConfig, ScreenState, SensorDisplayScreen, TextPanel, UiMessage,
        NOT_AVAILABLE,
    };

    const PROFILE: &str = r#"
[device]
model = "Bench Phone"

[[sensors]]
kind = "accelerometer"
name = "BMI260 Accelerometer"
vendor = "Bosch"
max_frequency_hz = 200.0

[[sensors]]
kind = "light"
name = "TMD3702 Light"
vendor = "ams"
max_frequency_hz = 10.0

[[sensors]]
kind = "rotation_vector"
name = "Rotation Vector"
vendor = "AOSP"
max_frequency_hz = 100.0
"#;

    type SimScreen = SensorDisplayScreen<Arc<SimulatedSensorService>, TextPanel>;

    fn bench_screen(config: ScreenConfig) -> (SimScreen, Arc<SimulatedSensorService>) {
        let profile = ConfigLoader::load_from_str(PROFILE, ConfigFormat::Toml).unwrap();
        let service = Arc::new(SimulatedSensorService::new(&profile).unwrap());
        let screen =
            SensorDisplayScreen::with_config(service.clone(), TextPanel::sensor_layout(), config);
        (screen, service)
    }

    /// Pump until `kind` shows a reading or the timeout passes
    async fn wait_for_reading(screen: &mut SimScreen, kind: SensorKind) -> bool {
        for _ in 0..100 {
            screen.pump();
            if screen.display().text_for(kind).is_some_and(|t| !t.is_empty()) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    /// End-to-end: profile → simulated platform → screen → panel
    #[tokio::test]
    async fn test_e2e_simulated_device() {
        let (mut screen, service) = bench_screen(ScreenConfig::default());

        screen.initialize().unwrap();
        assert_eq!(
            screen.available_kinds(),
            vec![
                SensorKind::Accelerometer,
                SensorKind::Light,
                SensorKind::RotationVector
            ]
        );

        screen.on_visible().unwrap();
        assert_eq!(service.active_subscriptions(), 3);

        assert!(wait_for_reading(&mut screen, SensorKind::Accelerometer).await);
        assert!(wait_for_reading(&mut screen, SensorKind::RotationVector).await);

        let panel = screen.display();
        let accel = panel.text_for(SensorKind::Accelerometer).unwrap();
        assert_eq!(accel.split(", ").count(), 3);
        let rotation = panel.text_for(SensorKind::RotationVector).unwrap();
        assert_eq!(rotation.split(", ").count(), 5);

        for kind in [
            SensorKind::Gyroscope,
            SensorKind::HeartRate,
            SensorKind::StepCounter,
        ] {
            assert_eq!(panel.text_for(kind), Some(NOT_AVAILABLE));
        }

        screen.on_hidden().unwrap();
        assert_eq!(service.active_subscriptions(), 0);
        assert_eq!(screen.state(), ScreenState::Hidden);
    }

    #[tokio::test]
    async fn test_visibility_cycles_leave_no_subscriptions() {
        let (mut screen, service) = bench_screen(ScreenConfig::default());
        screen.initialize().unwrap();

        for _ in 0..5 {
            screen.on_visible().unwrap();
            screen.on_visible().unwrap();
            assert_eq!(service.active_subscriptions(), 3);
            tokio::time::sleep(Duration::from_millis(5)).await;
            screen.on_hidden().unwrap();
            assert_eq!(service.active_subscriptions(), 0);
        }

        screen.destroy().unwrap();
        assert_eq!(service.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_na_survives_readings_and_cycles() {
        let (mut screen, _service) = bench_screen(ScreenConfig::default());
        screen.initialize().unwrap();
        screen.on_visible().unwrap();
        assert!(wait_for_reading(&mut screen, SensorKind::Accelerometer).await);
        screen.on_hidden().unwrap();
        screen.on_visible().unwrap();
        screen.pump();

        assert_eq!(
            screen.display().text_for(SensorKind::Pressure),
            Some(NOT_AVAILABLE)
        );
        assert_eq!(screen.display().writes(SensorKind::Pressure.slot()), 1);
    }

    #[tokio::test]
    async fn test_small_queue_keeps_latest() {
        let (mut screen, _service) = bench_screen(ScreenConfig::new(2, DropPolicy::DropOldest));
        screen.initialize().unwrap();
        screen.on_visible().unwrap();

        // Let the 200 Hz accelerometer overrun the queue before pumping
        tokio::time::sleep(Duration::from_millis(200)).await;
        screen.pump();

        let metrics = screen.metrics();
        assert!(metrics.readings_dropped > 0);
        assert!(metrics.readings_received > metrics.readings_displayed);
    }

    #[tokio::test]
    async fn test_pump_with_feeds_statistics() {
        let (mut screen, _service) = bench_screen(ScreenConfig::default());
        screen.initialize().unwrap();
        screen.on_visible().unwrap();

        let mut stats = ReadingStatsAggregator::new();
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            screen.pump_with(|message| {
                if let UiMessage::Reading(event) = message {
                    stats.update(event);
                }
            });
        }

        assert!(stats.total_readings > 0);
        assert!(stats.counts.contains_key(&SensorKind::Accelerometer));
        assert!(!stats.counts.contains_key(&SensorKind::Gyroscope));
    }

    #[test]
    fn test_empty_device_shows_na_everywhere() {
        let profile = ConfigLoader::load_from_str("[device]\nmodel = \"Bare\"\n", ConfigFormat::Toml)
            .unwrap();
        let service = SimulatedSensorService::new(&profile).unwrap();
        let mut screen = SensorDisplayScreen::new(service, TextPanel::sensor_layout());

        screen.initialize().unwrap();
        screen.on_visible().unwrap();

        assert_eq!(screen.active_subscriptions(), 0);
        for &kind in SensorKind::ALL {
            assert_eq!(screen.display().text_for(kind), Some(NOT_AVAILABLE));
        }
    }

    #[test]
    fn test_reference_phone_profile_is_valid() {
        let profile = DeviceProfile::reference_phone();
        ConfigLoader::validate(&profile).unwrap();

        let service = SimulatedSensorService::new(&profile).unwrap();
        let mut screen = SensorDisplayScreen::new(service, TextPanel::sensor_layout());
        screen.initialize().unwrap();

        assert_eq!(
            screen.missing_kinds(),
            vec![
                SensorKind::AmbientTemperature,
                SensorKind::HeartRate,
                SensorKind::RelativeHumidity
            ]
        );
    }
}
