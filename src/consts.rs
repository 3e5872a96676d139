/// Log file name, resolved against the project root (the working directory)
pub const LOG_FILE_NAME: &str = "PROJECT-PROGRESS-LOG.md";

/// Marker that opens every entry in the log: "## Entry #12 - Title"
pub const ENTRY_MARKER: &str = "## Entry #";

/// Label of the counter header line: "Session Counter: 3"
pub const COUNTER_LABEL: &str = "Session Counter:";

/// Minutes since the last entry before the reminder is shown
pub const DEFAULT_THRESHOLD_MINUTES: u64 = 15;

/// Counter value that triggers an auto-generated entry and a reset
pub const DEFAULT_RESET_EVERY: u64 = 5;

/// Commit summary used when version control has nothing to report
pub const NO_RECENT_COMMITS: &str = "[No recent commits]";

/// Number of commits summarised in an auto-generated entry
pub const RECENT_COMMIT_COUNT: usize = 3;
