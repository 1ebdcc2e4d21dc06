//! Command context and scoped logging.
//!
//! A [`Context`] bundles everything a command needs: the platform client,
//! the configuration snapshot, the database and a logging span. One
//! root context is built at startup; every invocation derives its own copy
//! with [`Context::with_uuid`] and later [`Context::with_command`]. Deriving
//! never changes the parent, so concurrent invocations cannot see each
//! other's fields.

use crate::config::Config;
use crate::db::Database;
use crate::platform::{InboundMessage, Platform};
use crate::telemetry::spans;
use std::sync::Arc;
use tracing::{Instrument, Span, error};
use uuid::Uuid;

/// Context passed to every command and pipeline stage.
#[derive(Clone)]
pub struct Context {
    /// Chat platform client.
    pub platform: Arc<dyn Platform>,
    /// Configuration snapshot, fixed for the process lifetime.
    pub config: Arc<Config>,
    /// Database handle tagged with this context's span.
    pub db: Database,
    span: Span,
}

impl Context {
    /// Create the root context.
    pub fn new(platform: Arc<dyn Platform>, config: Arc<Config>, db: Database) -> Self {
        let span = Span::none();
        Self {
            platform,
            config,
            db: db.with_span(span.clone()),
            span,
        }
    }

    /// Derive a context for one invocation identified by `uuid`.
    pub fn with_uuid(&self, uuid: Uuid) -> Self {
        self.derive(spans::invocation(&self.span, uuid))
    }

    /// Derive a context that also names the command being run.
    pub fn with_command(&self, command: &str) -> Self {
        self.derive(spans::command(&self.span, command))
    }

    fn derive(&self, span: Span) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
            config: Arc::clone(&self.config),
            db: self.db.with_span(span.clone()),
            span,
        }
    }

    /// Span every log line of this context belongs to.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Configured command prefix.
    pub fn prefix(&self) -> &str {
        &self.config.prefix
    }

    /// Send a message to the channel `message` came from.
    ///
    /// Send failures are logged, not returned: there is nobody left to
    /// report them to.
    pub async fn reply(&self, message: &InboundMessage, text: &str) {
        let result = self
            .platform
            .send_message(message.channel_id, text)
            .instrument(self.span().clone())
            .await;

        if let Err(e) = result {
            error!(
                parent: self.span(),
                error = %e,
                channel = %message.channel_id,
                "failed to send reply"
            );
        }
    }
}
