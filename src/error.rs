// file: src/error.rs
// version: 1.0.0
// guid: 3c8e1f52-6a0d-4b7e-9d21-5f4a7c0b9e13

use thiserror::Error;

/// Result type alias for the shell
pub type Result<T> = std::result::Result<T, ShellError>;

/// Error types for the sandbox shell and its filesystem capability
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Invalid modification: {0}")]
    InvalidModification(String),

    #[error("Security violation: {0}")]
    Security(String),

    #[error("Logger error: {0}")]
    Logger(String),
}

impl ShellError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new type mismatch error
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    /// Create a new invalid modification error
    pub fn invalid_modification(msg: impl Into<String>) -> Self {
        Self::InvalidModification(msg.into())
    }

    /// Create a new security error
    pub fn security(msg: impl Into<String>) -> Self {
        Self::Security(msg.into())
    }

    /// Create a new logger error
    pub fn logger(msg: impl Into<String>) -> Self {
        Self::Logger(msg.into())
    }
}
