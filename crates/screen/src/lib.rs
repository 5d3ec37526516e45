//! # Screen
//!
//! 传感器读数屏幕：生命周期、平台 → UI 交接队列、读数格式化。
//!
//! ## 使用示例
//!
//! ```ignore
//! use screen::{SensorDisplayScreen, TextPanel};
//!
//! let mut screen = SensorDisplayScreen::new(service, TextPanel::sensor_layout());
//! screen.initialize()?;
//! screen.on_visible()?;
//!
//! loop {
//!     screen.pump();
//!     println!("{}", screen.display().render());
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod handoff;
pub mod panel;
pub mod screen;

pub use config::{DropPolicy, HandoffMetrics, MetricsSnapshot, ScreenConfig};
pub use error::{Result, ScreenError};
pub use format::{format_values, NOT_AVAILABLE, VALUE_SEPARATOR};
pub use handoff::{handoff, ChannelListener, UiMessage, UiQueue};
pub use panel::TextPanel;
pub use screen::{ScreenState, SensorDisplayScreen};
