//! Custom error types for reflectbench.
//!
//! Explicit enum error types only. No `Box<dyn Error>` and no `anyhow::Result`
//! inside the libraries; the binaries are the only place errors get erased.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Mechanism;

/// Top-level error type for the benchmark workspace.
#[derive(Debug, Error)]
pub enum ReflectBenchError {
    // =========================================================================
    // Registration Errors - Fatal Before Any Measurement
    // =========================================================================
    #[error("Registration failed: {0}")]
    Registration(#[from] RegistrationError),

    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// The sample type or one of its members could not be resolved through a
/// reflection mechanism.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("{mechanism} registration failed: type {type_name} is not registered")]
    TypeNotRegistered {
        mechanism: Mechanism,
        type_name: &'static str,
    },

    #[error("{mechanism} registration failed: member '{member}' not found")]
    MissingMember {
        mechanism: Mechanism,
        member: &'static str,
    },

    #[error("reflect registration failed: type {type_name} is not a struct")]
    NotAStruct { type_name: &'static str },

    #[error("reflect registration failed: function '{name}' rejected - {reason}")]
    FunctionRegistration { name: &'static str, reason: String },
}

/// Hard validation errors stop the harness before it starts measuring.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type alias using ReflectBenchError.
pub type ReflectBenchResult<T> = Result<T, ReflectBenchError>;
