//! bouncer - moderation assistant for Discord staff channels.
//!
//! Inbound chat messages flow through the authorization gate, the command
//! parser and the command registry before a moderation command runs. Every
//! invocation gets its own correlation id so staff can find the matching
//! log lines when something goes wrong.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod platform;
pub mod telemetry;

pub use config::Config;
pub use db::Database;
pub use error::{CommandError, HandlerResult, RegistryError};
pub use handlers::{Dispatcher, Outcome, Report};
pub use platform::{InboundMessage, Platform, PlatformError, User};
