//! 传感器读数指标收集模块
//!
//! Prometheus 指标 + 内存中的读数统计聚合。

use std::collections::{BTreeMap, HashMap};

use contracts::{SensorEvent, SensorKind};
use metrics::{counter, gauge, histogram};

/// 记录检测到的传感器
pub fn record_sensor_detected(kind: &str) {
    counter!(
        "sensor_board_sensors_detected_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// 记录设备缺失的传感器
pub fn record_sensor_missing(kind: &str) {
    counter!(
        "sensor_board_sensors_missing_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// 记录显示到屏幕的读数
pub fn record_reading_displayed(kind: &str) {
    counter!(
        "sensor_board_readings_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// 记录因队列满而丢弃的读数
pub fn record_reading_dropped() {
    counter!("sensor_board_readings_displaced_total").increment(1);
}

/// 记录活跃订阅数
pub fn record_active_subscriptions(count: usize) {
    gauge!("sensor_board_active_subscriptions").set(count as f64);
}

/// 记录单次 pump 处理的消息数
pub fn record_pump_batch(messages: usize) {
    histogram!("sensor_board_pump_batch_size").record(messages as f64);
}

/// 读数统计聚合器
///
/// 在内存中按传感器类型聚合读数，便于输出摘要。
#[derive(Debug, Clone, Default)]
pub struct ReadingStatsAggregator {
    /// 总读数
    pub total_readings: u64,

    /// 丢弃的读数
    pub total_dropped: u64,

    /// 各类型读数次数
    pub counts: BTreeMap<SensorKind, u64>,

    /// 各类型读数间隔 (毫秒)
    pub interval_stats: BTreeMap<SensorKind, RunningStats>,

    /// 各类型上一条读数的时间戳
    last_timestamp_ns: HashMap<SensorKind, u64>,
}

impl ReadingStatsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, event: &SensorEvent) {
        self.total_readings += 1;
        *self.counts.entry(event.kind).or_insert(0) += 1;

        // Timestamps going backwards (e.g. two subscriptions interleaving) are not intervals
        if let Some(prev) = self.last_timestamp_ns.insert(event.kind, event.timestamp_ns) {
            if event.timestamp_ns >= prev {
                let interval_ms = (event.timestamp_ns - prev) as f64 / 1_000_000.0;
                self.interval_stats
                    .entry(event.kind)
                    .or_default()
                    .push(interval_ms);
            }
        }
    }

    /// 设置丢弃总数 (来自交接队列计数)
    pub fn set_dropped(&mut self, dropped: u64) {
        self.total_dropped = dropped;
    }

    /// 生成摘要报告
    pub fn summary(&self) -> ReadingSummary {
        let offered = self.total_readings + self.total_dropped;
        ReadingSummary {
            total_readings: self.total_readings,
            total_dropped: self.total_dropped,
            drop_rate: if offered > 0 {
                self.total_dropped as f64 / offered as f64 * 100.0
            } else {
                0.0
            },
            per_kind: self
                .counts
                .iter()
                .map(|(&kind, &count)| {
                    let interval_ms = self
                        .interval_stats
                        .get(&kind)
                        .map(StatsSummary::from)
                        .unwrap_or_default();
                    (kind, KindSummary { count, interval_ms })
                })
                .collect(),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 单个传感器类型的摘要
#[derive(Debug, Clone, Default)]
pub struct KindSummary {
    pub count: u64,
    pub interval_ms: StatsSummary,
}

/// 读数摘要
#[derive(Debug, Clone, Default)]
pub struct ReadingSummary {
    pub total_readings: u64,
    pub total_dropped: u64,
    pub drop_rate: f64,
    pub per_kind: BTreeMap<SensorKind, KindSummary>,
}

impl std::fmt::Display for ReadingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Reading Summary ===")?;
        writeln!(f, "Total readings: {}", self.total_readings)?;
        writeln!(
            f,
            "Dropped readings: {} ({:.2}%)",
            self.total_dropped, self.drop_rate
        )?;

        if !self.per_kind.is_empty() {
            writeln!(f, "Per sensor:")?;
            for (kind, summary) in &self.per_kind {
                writeln!(
                    f,
                    "  {}: {} readings, interval (ms): {}",
                    kind, summary.count, summary.interval_ms
                )?;
            }
        }

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.max
    }
}
