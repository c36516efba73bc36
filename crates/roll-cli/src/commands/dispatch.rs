use roll_config::RollConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &RollConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Process => commands::process::handle(config, flags),
        Commands::Aggregate => commands::aggregate::handle(config, flags),
        Commands::Stats => commands::stats::handle(config, flags),
        Commands::Run => commands::run::handle(config, flags),
        Commands::Parse(args) => commands::parse::handle(&args, config, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
