// SPDX-License-Identifier: MIT OR Apache-2.0
//! Site-level errors.

use crate::config::ConfigError;
use crate::forms::FormError;
use nailit_motion::TimelineError;
use thiserror::Error;

/// Errors surfaced by the site runtime
#[derive(Debug, Error)]
pub enum SiteError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A built-in timeline failed to build
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// A scripted form submission failed
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    /// A snapshot could not be encoded
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;
