//! # Observability
//!
//! 可观测性模块：Tracing + Prometheus 指标。
//!
//! ## 功能
//!
//! - 日志初始化 (JSON/Pretty/Compact 格式，输出到 stderr)
//! - Prometheus 指标导出 (可选)
//! - 传感器读数指标收集与统计
//!
//! ## 使用示例
//!
//! ```ignore
//! use observability::{init_logging, LoggingConfig, ReadingStatsAggregator, Verbosity};
//!
//! // 初始化
//! init_logging(LoggingConfig {
//!     verbosity: Verbosity::from_flags(1, false),
//!     ..Default::default()
//! })?;
//!
//! // 聚合读数
//! let mut stats = ReadingStatsAggregator::new();
//! screen.pump_with(|msg| {
//!     if let UiMessage::Reading(event) = msg {
//!         stats.update(event);
//!     }
//! });
//! println!("{}", stats.summary());
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

// Re-exports
pub use crate::metrics::{
    record_active_subscriptions, record_pump_batch, record_reading_displayed,
    record_reading_dropped, record_sensor_detected, record_sensor_missing, KindSummary,
    ReadingStatsAggregator, ReadingSummary, RunningStats, StatsSummary,
};

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 结构化日志
    Json,
    /// 人类可读格式
    #[default]
    Pretty,
    /// 紧凑单行格式
    Compact,
}

/// 日志详细程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// 只输出 warn 及以上，忽略 RUST_LOG
    Quiet,
    #[default]
    Normal,
    Debug,
    Trace,
}

impl Verbosity {
    /// 由 `-v` 次数与 `-q` 推导
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }

    fn level(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub verbosity: Verbosity,
}

/// 初始化全局 tracing subscriber
///
/// 日志写到 stderr，stdout 留给面板输出。除 `Quiet` 外 RUST_LOG 优先。
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(build_filter(config.verbosity, env.as_deref()))
        .with(fmt_layer(config.format))
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        format = ?config.format,
        verbosity = ?config.verbosity,
        "Logging initialized"
    );
    Ok(())
}

fn build_filter(verbosity: Verbosity, env: Option<&str>) -> EnvFilter {
    if verbosity == Verbosity::Quiet {
        return EnvFilter::new(verbosity.level());
    }
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(verbosity.level()))
}

fn fmt_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Json => layer
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

/// 仅初始化 Prometheus 指标（不初始化 Tracing）
///
/// 用于 Tracing 已由其他模块初始化的场景。
pub fn init_metrics_only(port: u16) -> Result<()> {
    let builder = PrometheusBuilder::new();
    builder
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}
