use crate::check;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::counter;
use crate::error::AppError;
use crate::settings::Settings;
use crate::utils::init_tracing;

/// Dispatch a parsed command line.
///
/// `check` never fails; its settings errors are only logged. `increment`
/// propagates every error to the caller.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let config = if cli.no_config {
        Config::default()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);
    init_tracing(cli.debug);

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => {
            match Settings::from_cli(&cli) {
                Ok(settings) => check::run(&settings),
                Err(e) => tracing::debug!("log check skipped: {e}"),
            }
            Ok(())
        }
        Commands::Increment => {
            let settings = Settings::from_cli(&cli)?;
            counter::run(&settings)
        }
    }
}
