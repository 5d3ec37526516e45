//! Platform error types

use contracts::{ContractError, SensorKind};
use thiserror::Error;

/// Platform specific error
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Profile lists the same kind twice
    #[error("device profile declares {kind} more than once")]
    DuplicateSensor { kind: SensorKind },

    /// Profile frequency unusable
    #[error("invalid max frequency for {kind}: {value} Hz")]
    InvalidFrequency { kind: SensorKind, value: f64 },

    /// Emitter thread could not be started
    #[error("failed to start emitter for {kind}: {source}")]
    EmitterSpawn {
        kind: SensorKind,
        #[source]
        source: std::io::Error,
    },

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl From<PlatformError> for ContractError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::Contract(inner) => inner,
            PlatformError::EmitterSpawn { kind, source } => {
                ContractError::subscription_failed(kind, source.to_string())
            }
            other => ContractError::Other(other.to_string()),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, PlatformError>;
