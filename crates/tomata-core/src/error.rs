//! Core error types for tomata-core.
//!
//! A thiserror-based hierarchy: one top-level `CoreError` with `#[from]`
//! conversions from the per-concern error enums below.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tomata-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Data-store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Music-bridge errors
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Data-store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the data document
    #[error("Failed to read data file at {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    /// Failed to write the data document
    #[error("Failed to write data file at {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// Document did not parse
    #[error("Failed to parse data file at {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Music-bridge errors.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Helper binary could not be spawned
    #[error("Failed to spawn player process {path}: {source}")]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Command sent while no process is running
    #[error("Player process is not running")]
    NotRunning,

    /// The child's stdin is gone or unwritable
    #[error("Player process stdin is not writable")]
    StdinUnavailable,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Operation rejected while a timer or plan is running
    #[error("Operation not allowed while running: {0}")]
    Busy(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
