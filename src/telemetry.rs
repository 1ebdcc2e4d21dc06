//! Telemetry utilities: log setup, command timing and invocation spans.

use std::time::Instant;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

/// Pick the log level from the command line verbosity flags.
pub fn level_from_flags(debug: bool, trace: bool) -> Level {
    if trace {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set, otherwise everything at `level` and above is
/// logged.
pub fn init(level: Level) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase())),
        )
        .with_target(true)
        .init();
}

/// Guard for timing command execution.
///
/// Logs the command latency at debug level when dropped, inside whatever
/// span is current at that point.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        debug!(command = %self.command, elapsed_ms, "command finished");
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};
    use uuid::Uuid;

    /// Span for one command invocation, keyed by its correlation id.
    pub fn invocation(parent: &Span, uuid: Uuid) -> Span {
        info_span!(parent: parent, "invocation", uuid = %uuid)
    }

    /// Span for a named command, either while it runs or during setup.
    pub fn command(parent: &Span, command: &str) -> Span {
        info_span!(parent: parent, "command", command = %command)
    }
}
