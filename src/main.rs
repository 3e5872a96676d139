use clap::Parser;

use progress_log::app;
use progress_log::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = app::run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
