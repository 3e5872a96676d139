//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Remind if the last log entry is too old (default)
    Check,
    /// Bump the session counter, auto-generating an entry every N sessions
    Increment,
}
