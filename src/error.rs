//! Unified error handling for bouncer.
//!
//! Each layer owns its error type (`ConfigError` in config, `DbError` in db,
//! `PlatformError` in platform). This module holds the errors the command
//! pipeline itself produces.

use crate::db::DbError;
use crate::platform::PlatformError;
use thiserror::Error;

// ============================================================================
// Registry Errors (startup)
// ============================================================================

/// Errors that can occur while building the command registry.
///
/// These are fatal: the bot must not start serving messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate command '{0}'")]
    Duplicate(String),
}

// ============================================================================
// Command Errors (handler execution)
// ============================================================================

/// Errors a command can return from `Command::handle`.
///
/// The dispatcher never shows these to the sender. They are logged next to
/// the invocation uuid and the sender only gets the uuid.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("database error: {0}")]
    Db(#[from] DbError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Missing resolved user for a command that declared `requires_user`.
    #[error("command ran without a resolved user")]
    MissingUser,

    #[error("command failed: {0}")]
    Failed(String),
}

impl CommandError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Db(_) => "database",
            Self::Platform(_) => "platform",
            Self::MissingUser => "missing_user",
            Self::Failed(_) => "failed",
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), CommandError>;
