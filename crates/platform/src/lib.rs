//! # Platform
//!
//! Sensor platform implementations.
//!
//! Responsibilities:
//! - Hand out sensor handles for the kinds a device carries
//! - Manage subscriptions and deliver readings off the caller's thread
//! - Provide a scriptable mock for tests

pub mod error;
pub mod mock_service;
pub mod signal;
pub mod simulated;

pub use contracts::{SensorService, SharedListener};
pub use error::{PlatformError, Result};
pub use mock_service::{MockSensorService, MockServiceConfig};
pub use signal::SignalGenerator;
pub use simulated::{SimulatedSensorService, SimulationConfig};
