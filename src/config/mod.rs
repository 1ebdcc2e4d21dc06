//! Configuration loading and management.
//!
//! - [`types`]: Config struct definitions and loading
//! - [`validation`]: Startup checks that collect every problem at once

mod types;
mod validation;

pub use types::{CONFIG_FILE, CategoryConfig, Config, ConfigError, DATABASE_FILE, RoleConfig};
pub use validation::{ValidationError, validate};
