//! Moderation commands.
//!
//! Each command is a small struct implementing [`Command`]. [`all`] lists
//! every command the bot ships with; the registry is built from it at
//! startup.

mod block;
mod help;
mod note;
mod search;
mod warn;

pub use block::BlockCommand;
pub use help::HelpCommand;
pub use note::NoteCommand;
pub use search::SearchCommand;
pub use warn::WarnCommand;

use crate::handlers::Command;

/// Every built-in command, `help` included.
pub fn all() -> Vec<Box<dyn Command>> {
    let mut commands: Vec<Box<dyn Command>> = vec![
        Box::new(WarnCommand),
        Box::new(NoteCommand),
        Box::new(SearchCommand),
        Box::new(BlockCommand::block()),
        Box::new(BlockCommand::unblock()),
    ];

    let entries = commands.iter().map(|c| (c.name(), c.usage())).collect();
    commands.push(Box::new(HelpCommand::new(entries)));
    commands
}
