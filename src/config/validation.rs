//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("discord token is required")]
    MissingToken,
    #[error("command_prefix is required")]
    MissingPrefix,
    #[error("command_prefix must not contain whitespace, got '{0}'")]
    PrefixWhitespace(String),
    #[error("categories.listening must name at least one category")]
    NoCategories,
    #[error("roles.admin must name at least one role")]
    NoAdminRoles,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.token.trim().is_empty() {
        errors.push(ValidationError::MissingToken);
    }

    if config.prefix.is_empty() {
        errors.push(ValidationError::MissingPrefix);
    } else if config.prefix.chars().any(char::is_whitespace) {
        errors.push(ValidationError::PrefixWhitespace(config.prefix.clone()));
    }

    // Without these the gate rejects every message
    if config.categories.listening.is_empty() {
        errors.push(ValidationError::NoCategories);
    }
    if config.roles.admin.is_empty() {
        errors.push(ValidationError::NoAdminRoles);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
