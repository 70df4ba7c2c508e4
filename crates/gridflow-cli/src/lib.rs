pub mod case;
pub mod cli;
pub mod common;

pub use cli::{build_cli_command, CaseArgs, Cli, Commands, GraphCommands};
