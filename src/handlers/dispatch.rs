//! Command dispatch.
//!
//! One call to [`Dispatcher::handle_message`] is one invocation. It runs
//! gate, parse, lookup, user resolution and the command itself in that
//! order, and replies at most once with the outcome. When debug logging is
//! enabled the sender also gets the invocation uuid up front. Nothing a
//! command does, including panicking, escapes an invocation.

use super::core::{Command, Context, Registry};
use super::{ParsedCommand, gate, parse, resolve};
use crate::platform::InboundMessage;
use crate::telemetry::CommandTimer;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{Instrument, Level, debug, error, warn};
use uuid::Uuid;

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Filtered out by the gate; nothing was sent.
    Ignored,
    /// No command with this name.
    UnknownCommand(String),
    /// The command needs a user and none resolved.
    MissingUser,
    /// The command ran and succeeded.
    Success,
    /// The command returned an error or panicked.
    Failure { panicked: bool },
}

/// Result of one invocation.
#[derive(Debug, Clone)]
pub struct Report {
    /// Correlation id attached to every log line of the invocation.
    pub uuid: Uuid,
    pub outcome: Outcome,
}

/// Routes inbound messages to commands.
pub struct Dispatcher {
    registry: Arc<Registry>,
    ctx: Context,
}

impl Dispatcher {
    /// Create a dispatcher over a built registry and the root context.
    pub fn new(registry: Arc<Registry>, ctx: Context) -> Self {
        Self { registry, ctx }
    }

    /// Handle one inbound message.
    pub async fn handle_message(&self, message: InboundMessage) -> Report {
        let uuid = Uuid::new_v4();
        let ctx = self.ctx.with_uuid(uuid);
        let span = ctx.span().clone();

        let outcome = self.invoke(uuid, &ctx, &message).instrument(span).await;
        Report { uuid, outcome }
    }

    async fn invoke(&self, uuid: Uuid, ctx: &Context, message: &InboundMessage) -> Outcome {
        if !gate::should_process(message, ctx).await {
            return Outcome::Ignored;
        }

        // Past the gate the sender is staff, so they may see the uuid
        if tracing::enabled!(Level::DEBUG) {
            ctx.reply(message, &format!("UUID for logs is `{uuid}`."))
                .await;
        }

        let mut parsed = parse::parse(&message.content, ctx.prefix());

        let Some(command) = self.registry.lookup(&parsed.name) else {
            debug!(name = %parsed.name, "no command exists with this name");
            ctx.reply(
                message,
                &format!(
                    "Unknown command `{}` - see `{}help`",
                    parsed.name,
                    ctx.prefix()
                ),
            )
            .await;
            return Outcome::UnknownCommand(parsed.name);
        };

        let ctx = ctx.with_command(&parsed.short_string());
        let span = ctx.span().clone();

        async {
            if command.requires_user() && !resolve::attach_user(&mut parsed, message, &ctx).await {
                warn!("user not found, but one is required");
                ctx.reply(
                    message,
                    &format!(
                        "This command requires a valid user - see `{}help`",
                        ctx.prefix()
                    ),
                )
                .await;
                return Outcome::MissingUser;
            }

            self.execute(uuid, command, &parsed, message, &ctx).await
        }
        .instrument(span)
        .await
    }

    /// Run the command, containing errors and panics.
    async fn execute(
        &self,
        uuid: Uuid,
        command: &dyn Command,
        parsed: &ParsedCommand,
        message: &InboundMessage,
        ctx: &Context,
    ) -> Outcome {
        let _timer = CommandTimer::new(command.name());
        let result = AssertUnwindSafe(command.handle(parsed, message, ctx))
            .catch_unwind()
            .await;

        let panicked = match result {
            Ok(Ok(())) => return Outcome::Success,
            Ok(Err(e)) => {
                warn!(error = %e, error_code = e.error_code(), "command failed");
                false
            }
            Err(payload) => {
                error!(panic = %panic_message(payload.as_ref()), "command panicked");
                true
            }
        };

        // The sender gets the uuid only; details stay in the logs
        ctx.reply(
            message,
            &format!(
                "Oops, something went wrong handling that message. Check the logs for `{uuid}`."
            ),
        )
        .await;

        Outcome::Failure { panicked }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
