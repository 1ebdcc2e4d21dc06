//! Core command infrastructure.
//!
//! - [`Command`]: the trait every moderation command implements
//! - [`Registry`]: name to command map, built once at startup
//! - [`Context`]: per-invocation bundle of platform, config, database and
//!   logging span

pub mod context;
pub mod registry;
pub mod traits;

pub use context::Context;
pub use registry::Registry;
pub use traits::Command;
