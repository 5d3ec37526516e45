//! Screen hosting module.

mod session;
mod stats;

pub use session::{Session, SessionConfig};
pub use stats::SessionStats;
