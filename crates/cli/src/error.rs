//! Error types for CLI operations.

use contracts::ContractError;
use platform::PlatformError;
use screen::ScreenError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Profile file not found
    #[error("Device profile not found: {path}")]
    ProfileNotFound { path: String },

    /// Profile could not be loaded or failed validation
    #[error("Failed to load device profile {path}")]
    ProfileLoad {
        path: String,
        #[source]
        source: ContractError,
    },

    /// Simulated platform could not be built
    #[error("Failed to start sensor platform")]
    Platform(#[from] PlatformError),

    /// Screen lifecycle failure
    #[error("Screen error")]
    Screen(#[from] ScreenError),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn profile_not_found(path: impl Into<String>) -> Self {
        Self::ProfileNotFound { path: path.into() }
    }

    pub fn profile_load(path: impl Into<String>, source: ContractError) -> Self {
        Self::ProfileLoad {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
