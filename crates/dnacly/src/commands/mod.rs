//! Command dispatch: bridges CLI args -> core Controller -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod devices;
pub mod interfaces;
pub mod logout;

use dnacly_core::{Controller, Session};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch<S: Session>(
    cmd: Command,
    controller: &mut Controller<S>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Auth => auth::handle(controller, global).await,
        Command::Devices => devices::handle(controller, global).await,
        Command::Interfaces(args) => interfaces::handle(controller, args, global).await,
        // Handled before a controller is built
        Command::Logout | Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
