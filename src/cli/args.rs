//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

use super::commands::Commands;

#[derive(Debug, Default, Parser)]
#[command(name = "progress-log")]
#[command(about = "Progress log reminder and session counter", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Progress log to read and update (default: ./PROJECT-PROGRESS-LOG.md)
    #[arg(short = 'f', long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Minutes since the last entry before a reminder is shown (default: 15)
    #[arg(short, long, global = true, value_name = "MINUTES")]
    pub threshold: Option<u64>,

    /// Sessions between auto-generated entries (default: 5)
    #[arg(short, long, global = true, value_name = "COUNT")]
    pub reset_every: Option<u64>,

    /// Timezone for timestamps without an offset (e.g., "UTC", "Europe/Berlin")
    #[arg(long, global = true, value_name = "TZ")]
    pub timezone: Option<String>,

    /// Enable debug output on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Ignore config files
    #[arg(long, global = true)]
    pub no_config: bool,
}

impl Cli {
    /// Flagless invocation of a single command, as the standalone binaries run
    pub fn for_command(command: Commands) -> Self {
        Self {
            command: Some(command),
            ..Self::default()
        }
    }

    /// Merge config file values into CLI (CLI args take precedence)
    pub fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }
        if self.log_file.is_none() {
            self.log_file = config.log_file.clone();
        }
        if self.threshold.is_none() {
            self.threshold = config.threshold_minutes;
        }
        if self.reset_every.is_none() {
            self.reset_every = config.reset_every;
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        toml::from_str(
            r#"
log_file = "from-config.md"
threshold_minutes = 45
reset_every = 10
timezone = "Asia/Shanghai"
debug = true
"#,
        )
        .unwrap()
    }

    #[test]
    fn config_fills_unset_flags() {
        let cli = Cli::parse_from(["progress-log"]).with_config(&config());
        assert_eq!(cli.log_file, Some(PathBuf::from("from-config.md")));
        assert_eq!(cli.threshold, Some(45));
        assert_eq!(cli.reset_every, Some(10));
        assert_eq!(cli.timezone.as_deref(), Some("Asia/Shanghai"));
        assert!(cli.debug);
    }

    #[test]
    fn flags_win_over_config() {
        let cli = Cli::parse_from([
            "progress-log",
            "increment",
            "-f",
            "cli.md",
            "-t",
            "5",
            "-r",
            "2",
            "--timezone",
            "UTC",
        ])
        .with_config(&config());
        assert!(matches!(cli.command, Some(Commands::Increment)));
        assert_eq!(cli.log_file, Some(PathBuf::from("cli.md")));
        assert_eq!(cli.threshold, Some(5));
        assert_eq!(cli.reset_every, Some(2));
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["progress-log", "check", "--debug"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert!(cli.debug);
    }

    #[test]
    fn for_command_has_no_overrides() {
        let cli = Cli::for_command(Commands::Increment);
        assert!(matches!(cli.command, Some(Commands::Increment)));
        assert!(cli.log_file.is_none());
        assert!(!cli.no_config);
    }
}
