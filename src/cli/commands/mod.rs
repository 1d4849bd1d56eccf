//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod respond;
pub mod settings;
pub mod version;

use crate::cli::args::{Cli, Commands, SettingsSubcommand};
use crate::error::GtcPeerError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), GtcPeerError> {
    match cli.command {
        Commands::Settings(cmd) => match cmd.subcommand {
            SettingsSubcommand::Show(args) => settings::show(&args),
            SettingsSubcommand::Check(args) => settings::check(&args),
        },
        Commands::Respond(args) => respond::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
