//! # Contracts
//!
//! Shared interface contracts between the sensor platform, the display
//! screen and the host binary. All business crates depend on this crate,
//! reverse dependencies are prohibited.
//!
//! ## Seams
//! - [`SensorService`]: platform side, hands out sensor handles and manages subscriptions
//! - [`SensorEventListener`]: capability the platform calls back into
//! - [`DisplaySurface`]: pre-declared text slots the screen writes into

mod display;
mod error;
mod profile;
mod sensor;
mod sensor_kind;
mod sensor_service;

pub use display::DisplaySurface;
pub use error::*;
pub use profile::*;
pub use sensor::*;
pub use sensor_kind::*;
pub use sensor_service::{SensorEventListener, SensorService, SharedListener};
