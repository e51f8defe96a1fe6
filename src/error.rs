//! Error types for configuration resolution and notification dispatch.
//!
//! Configuration errors are fatal to startup: nothing is dispatched if the
//! merged view cannot be built. Dispatch errors are per-service and never
//! prevent delivery to the remaining active services.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the merged configuration view.
///
/// A missing config file is deliberately *not* represented here; absence is
/// a normal outcome and the file layer simply stays empty.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The located config file exists but is not valid YAML.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config file could not be read (permissions, explicit path that
    /// does not exist, etc.).
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Path of the config file involved in the failure.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConfigError::Parse { path, .. } => path,
            ConfigError::Io { path, .. } => path,
        }
    }
}

/// A backend failed to deliver a notification.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The backend was invoked but rejected or failed the send.
    #[error("{service}: backend failed: {reason}")]
    Backend { service: String, reason: String },

    /// The backend is active but a setting it requires is unbound.
    #[error("{service}: missing required setting '{key}'")]
    MissingSetting { service: String, key: String },
}

impl DispatchError {
    pub fn backend(service: impl Into<String>, reason: impl Into<String>) -> Self {
        DispatchError::Backend {
            service: service.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_setting(service: impl Into<String>, key: impl Into<String>) -> Self {
        DispatchError::MissingSetting {
            service: service.into(),
            key: key.into(),
        }
    }
}
