//! The contract every moderation command implements.

use super::context::Context;
use crate::error::HandlerResult;
use crate::handlers::ParsedCommand;
use crate::platform::InboundMessage;
use async_trait::async_trait;

/// A named moderation command.
///
/// The dispatcher only ever sees commands through this trait. A command
/// reports failure by returning an error; the dispatcher logs it and
/// replies to the sender with the invocation uuid. Panics are caught and
/// treated the same way.
///
/// # Example
///
/// ```ignore
/// pub struct PingCommand;
///
/// #[async_trait]
/// impl Command for PingCommand {
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     async fn handle(
///         &self,
///         _command: &ParsedCommand,
///         message: &InboundMessage,
///         ctx: &Context,
///     ) -> HandlerResult {
///         ctx.reply(message, "pong").await;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Command: Send + Sync {
    /// Name the command is invoked by. Case-sensitive, unique per registry.
    fn name(&self) -> &'static str;

    /// Whether the first argument must resolve to a user.
    ///
    /// When true, `handle` is only called with `command.user` set and the
    /// user reference shifted out of `command.args`.
    fn requires_user(&self) -> bool {
        false
    }

    /// Short usage line shown by `help`.
    fn usage(&self) -> &'static str {
        ""
    }

    /// Called once before the bot connects, with a context scoped to this
    /// command's name. Don't keep the context around.
    fn setup(&self, _ctx: &Context) {}

    /// Run the command.
    async fn handle(
        &self,
        command: &ParsedCommand,
        message: &InboundMessage,
        ctx: &Context,
    ) -> HandlerResult;
}
