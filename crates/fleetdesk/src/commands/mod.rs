//! Command dispatch: bridges CLI args -> core controllers -> output formatting.

pub mod config_cmd;
pub mod drivers;
pub mod trucks;
pub mod util;

use fleetdesk_core::Fleet;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, fleet: &Fleet, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Trucks(args) => trucks::handle(fleet, args, global).await,
        Command::Drivers(args) => drivers::handle(fleet, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
