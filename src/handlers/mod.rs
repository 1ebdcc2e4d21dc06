//! Command handling pipeline.
//!
//! Every inbound message goes through the same stages:
//!
//! 1. [`gate`]: is this a command from staff, in a listening category?
//! 2. [`parse`]: split the text into a command name and arguments
//! 3. registry lookup: find the [`Command`] with that name
//! 4. [`resolve`]: for commands that need one, turn the first argument
//!    into a user
//! 5. run the command, catching errors and panics
//!
//! [`Dispatcher`] drives the stages and owns the replies.

pub mod core;
mod dispatch;
pub mod gate;
pub mod parse;
pub mod resolve;

pub use self::core::{Command, Context, Registry};
pub use dispatch::{Dispatcher, Outcome, Report};
pub use parse::{ParsedCommand, parse};
