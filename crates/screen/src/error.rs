//! Screen 错误类型

use contracts::{ContractError, SensorKind};
use thiserror::Error;

use crate::ScreenState;

/// Screen 错误
#[derive(Debug, Error)]
pub enum ScreenError {
    /// 生命周期操作在当前状态下不允许
    #[error("cannot {operation} while screen is {state}")]
    InvalidTransition {
        /// 请求的操作
        operation: &'static str,
        /// 当前状态
        state: ScreenState,
    },

    /// 平台拒绝订阅
    #[error("failed to subscribe to {kind}")]
    Subscribe {
        /// 传感器类型
        kind: SensorKind,
        #[source]
        source: ContractError,
    },

    /// 平台拒绝取消订阅
    #[error("failed to unsubscribe from {kind}")]
    Unsubscribe {
        /// 传感器类型
        kind: SensorKind,
        #[source]
        source: ContractError,
    },
}

/// Screen Result 类型别名
pub type Result<T> = std::result::Result<T, ScreenError>;
