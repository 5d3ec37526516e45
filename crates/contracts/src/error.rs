//! Layered error definitions
//!
//! Categorized by source: config / sensor / subscription

use thiserror::Error;

use crate::{SensorKind, SubscriptionId};

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Sensor Errors =====
    /// Unrecognized sensor kind string
    #[error("unknown sensor kind: {value}")]
    UnknownSensorKind { value: String },

    /// Handle refers to a sensor the platform does not have
    #[error("sensor not available: {kind}")]
    SensorUnavailable { kind: SensorKind },

    // ===== Subscription Errors =====
    /// Platform refused a subscription
    #[error("subscription to {kind} failed: {message}")]
    SubscriptionFailed { kind: SensorKind, message: String },

    /// Unsubscribe for a subscription the platform does not know
    #[error("unknown subscription {id} for {kind}")]
    UnknownSubscription { kind: SensorKind, id: SubscriptionId },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create subscription failure
    pub fn subscription_failed(kind: SensorKind, message: impl Into<String>) -> Self {
        Self::SubscriptionFailed {
            kind,
            message: message.into(),
        }
    }
}
