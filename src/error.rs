//! Process-level error types for the assetgen CLI.
//!
//! Only errors that end the process live here. Failures of a single draft or
//! spec are `jobs::ItemFailure` values and never reach this type.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for assetgen operations.
#[derive(Error, Debug)]
pub enum AssetgenError {
    /// User provided invalid arguments or the project is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// The config file could not be read, parsed, or validated.
    #[error("invalid config: {0}")]
    ConfigError(String),

    /// Items failed during a `--strict` run.
    #[error("generation incomplete: {0}")]
    GenerationFailure(String),
}

impl AssetgenError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AssetgenError::UserError(_) => exit_codes::USER_ERROR,
            AssetgenError::ConfigError(_) => exit_codes::USER_ERROR,
            AssetgenError::GenerationFailure(_) => exit_codes::GENERATION_FAILURE,
        }
    }
}

/// Result type alias for assetgen operations.
pub type Result<T> = std::result::Result<T, AssetgenError>;
