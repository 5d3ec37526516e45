//! Mock 传感器服务
//!
//! 用于单元测试的 mock 实现：手动注入读数，支持注入失败场景。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use contracts::{
    Accuracy, ContractError, HandleId, SamplingRate, SensorEvent, SensorHandle, SensorKind,
    SensorService, SharedListener, SubscriptionId,
};
use tracing::instrument;

/// Mock 服务配置
#[derive(Debug, Default, Clone)]
pub struct MockServiceConfig {
    /// 设备上存在的传感器类型
    pub present: Vec<SensorKind>,
    /// subscribe 应该失败的类型
    pub fail_subscribe: Vec<SensorKind>,
    /// unsubscribe 应该失败的类型
    pub fail_unsubscribe: Vec<SensorKind>,
}

struct MockSubscription {
    kind: SensorKind,
    listener: SharedListener,
    rate: SamplingRate,
}

/// Mock 传感器服务
///
/// Readings are delivered synchronously on the thread calling `emit`.
/// Like the real platform, subscribing twice delivers twice.
pub struct MockSensorService {
    /// 配置（可注入失败场景）
    config: MockServiceConfig,
    /// 存在的传感器 handle
    handles: HashMap<SensorKind, SensorHandle>,
    /// Subscription ID 计数器
    next_subscription: AtomicU64,
    /// 活跃订阅
    subscriptions: Mutex<HashMap<SubscriptionId, MockSubscription>>,
    /// subscribe 调用次数 (含失败)
    subscribe_calls: AtomicU64,
    /// default_sensor 查询记录
    lookups: Mutex<Vec<SensorKind>>,
}

impl MockSensorService {
    /// 使用配置创建 mock 服务
    pub fn with_config(config: MockServiceConfig) -> Self {
        let handles = config
            .present
            .iter()
            .enumerate()
            .map(|(idx, &kind)| {
                (
                    kind,
                    SensorHandle {
                        id: HandleId(100 + idx as u32), // 从 100 开始，便于识别
                        kind,
                        name: format!("Mock {}", kind.display_name()),
                        vendor: "Mock Vendor".to_string(),
                        max_frequency_hz: 100.0,
                    },
                )
            })
            .collect();

        Self {
            config,
            handles,
            next_subscription: AtomicU64::new(1),
            subscriptions: Mutex::new(HashMap::new()),
            subscribe_calls: AtomicU64::new(0),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// 只包含给定类型的设备
    pub fn with_kinds(kinds: &[SensorKind]) -> Self {
        Self::with_config(MockServiceConfig {
            present: kinds.to_vec(),
            ..Default::default()
        })
    }

    /// 包含全部 19 种传感器的设备
    pub fn all_present() -> Self {
        Self::with_kinds(SensorKind::ALL)
    }

    /// 没有任何传感器的设备
    pub fn empty() -> Self {
        Self::with_kinds(&[])
    }

    /// 向该类型的所有订阅者投递读数，返回投递次数
    pub fn emit(&self, kind: SensorKind, values: &[f32]) -> usize {
        let Some(handle) = self.handles.get(&kind) else {
            return 0;
        };

        // Clone listeners out so callbacks run without holding the lock
        let listeners = self.listeners_for(kind);
        for listener in &listeners {
            listener.on_reading(SensorEvent {
                handle_id: handle.id,
                kind,
                values: values.to_vec(),
                timestamp_ns: 0,
                accuracy: Accuracy::High,
            });
        }
        listeners.len()
    }

    /// 向该类型的所有订阅者投递精度变化
    pub fn emit_accuracy(&self, kind: SensorKind, accuracy: Accuracy) -> usize {
        let Some(handle) = self.handles.get(&kind) else {
            return 0;
        };
        let listeners = self.listeners_for(kind);
        for listener in &listeners {
            listener.on_accuracy_changed(handle, accuracy);
        }
        listeners.len()
    }

    /// 当前活跃订阅数
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.lock().unwrap().len()
    }

    /// 某类型的活跃订阅数
    pub fn active_subscriptions_for(&self, kind: SensorKind) -> usize {
        self.subscriptions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.kind == kind)
            .count()
    }

    /// 某类型订阅时请求的采样率
    pub fn rates_for(&self, kind: SensorKind) -> Vec<SamplingRate> {
        self.subscriptions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.kind == kind)
            .map(|s| s.rate)
            .collect()
    }

    /// subscribe 调用总次数
    pub fn subscribe_calls(&self) -> u64 {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    /// default_sensor 查询记录
    pub fn lookups(&self) -> Vec<SensorKind> {
        self.lookups.lock().unwrap().clone()
    }

    fn listeners_for(&self, kind: SensorKind) -> Vec<SharedListener> {
        self.subscriptions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.kind == kind)
            .map(|s| s.listener.clone())
            .collect()
    }
}

impl Default for MockSensorService {
    fn default() -> Self {
        Self::all_present()
    }
}

impl SensorService for MockSensorService {
    fn default_sensor(&self, kind: SensorKind) -> Option<SensorHandle> {
        self.lookups.lock().unwrap().push(kind);
        self.handles.get(&kind).cloned()
    }

    #[instrument(name = "mock_subscribe", skip(self, handle, listener), fields(kind = %handle.kind))]
    fn subscribe(
        &self,
        handle: &SensorHandle,
        listener: SharedListener,
        rate: SamplingRate,
    ) -> Result<SubscriptionId, ContractError> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);

        if !self.handles.contains_key(&handle.kind) {
            return Err(ContractError::SensorUnavailable { kind: handle.kind });
        }
        if self.config.fail_subscribe.contains(&handle.kind) {
            return Err(ContractError::subscription_failed(
                handle.kind,
                "mock failure",
            ));
        }

        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        self.subscriptions.lock().unwrap().insert(
            id,
            MockSubscription {
                kind: handle.kind,
                listener,
                rate,
            },
        );
        Ok(id)
    }

    #[instrument(name = "mock_unsubscribe", skip(self, handle), fields(kind = %handle.kind))]
    fn unsubscribe(
        &self,
        handle: &SensorHandle,
        subscription: SubscriptionId,
    ) -> Result<(), ContractError> {
        if self.config.fail_unsubscribe.contains(&handle.kind) {
            return Err(ContractError::Other(format!(
                "mock unsubscribe failure for {}",
                handle.kind
            )));
        }

        self.subscriptions
            .lock()
            .unwrap()
            .remove(&subscription)
            .map(|_| ())
            .ok_or(ContractError::UnknownSubscription {
                kind: handle.kind,
                id: subscription,
            })
    }
}
