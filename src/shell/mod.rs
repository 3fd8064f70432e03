//! External process execution and platform helpers.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use mock::{ScriptedResponse, ScriptedRunner};
pub use platform::{is_ci, is_executable, parse_system_path, resolve_tool_path, Platform};
