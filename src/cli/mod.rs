//! Command-line interface for deployinfo.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, LaunchArgs, ShowArgs, UpdateArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
