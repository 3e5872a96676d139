//! Standalone session counter. Run once at the start of every session.

use progress_log::app;
use progress_log::cli::{Cli, Commands};

fn main() {
    if let Err(e) = app::run(Cli::for_command(Commands::Increment)) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
