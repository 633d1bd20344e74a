//! Error types for aclseed

use std::path::PathBuf;
use thiserror::Error;

/// Result type for aclseed operations
pub type Result<T> = std::result::Result<T, AclSeedError>;

/// Main error type for aclseed
#[derive(Error, Debug)]
pub enum AclSeedError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authorization table errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Setup run errors
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised by the authorization table store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Role name must not be empty")]
    EmptyRoleName,

    #[error("Role '{role}' declares a permission on an empty resource name")]
    EmptyResourceName { role: String },

    #[error("Role '{role}' references invalid method name '{method}'")]
    InvalidMethodName { role: String, method: String },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Role not found: {0}")]
    UnknownRole(String),
}

/// Errors raised while selecting or running setup routines
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Unknown setup profile: {0}")]
    UnknownProfile(String),
}

impl From<anyhow::Error> for AclSeedError {
    fn from(err: anyhow::Error) -> Self {
        AclSeedError::Other(err.to_string())
    }
}

impl From<serde_json::Error> for AclSeedError {
    fn from(err: serde_json::Error) -> Self {
        AclSeedError::Other(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::UnknownTable("pr_services.video".to_string());
        assert_eq!(err.to_string(), "Unknown table: pr_services.video");

        let err = SetupError::UnknownProfile("enterprise".to_string());
        assert_eq!(err.to_string(), "Unknown setup profile: enterprise");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let seed_err: AclSeedError = io_err.into();
        assert!(matches!(seed_err, AclSeedError::Io(_)));

        let store_err: AclSeedError = StoreError::EmptyRoleName.into();
        assert!(matches!(store_err, AclSeedError::Store(StoreError::EmptyRoleName)));
    }
}
