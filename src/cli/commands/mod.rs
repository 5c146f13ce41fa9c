//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands receive the deployment context and
//! settings up front so they can be exercised with a [`MockUI`] in tests.
//!
//! [`MockUI`]: crate::ui::MockUI

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod launch;
pub mod show;
pub mod update;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
