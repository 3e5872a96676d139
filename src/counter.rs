//! Session counter
//!
//! Each run bumps `Session Counter: N` in the log. When the counter reaches
//! the reset threshold a placeholder entry is appended and the counter goes
//! back to zero, all in a single locked write.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::check;
use crate::consts::RECENT_COMMIT_COUNT;
use crate::document::LogDocument;
use crate::error::AppError;
use crate::git::{CommitSource, GitLog, commit_summary};
use crate::settings::Settings;
use crate::store::{LOCK_TIMEOUT, LogLock, write_atomic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementOutcome {
    Incremented { counter: u64 },
    EntryGenerated,
}

impl fmt::Display for IncrementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncrementOutcome::Incremented { counter } => {
                write!(f, "Counter incremented to {counter}")
            }
            IncrementOutcome::EntryGenerated => {
                f.write_str("Auto-generated log entry added! Resetting counter.")
            }
        }
    }
}

/// Placeholder entry appended every `reset_every` sessions
pub fn auto_entry(now: DateTime<Utc>, commits: &str) -> String {
    format!(
        "\n\n# Log Entry (#{millis})\n\
         - Date: {date}\n\
         - Goal: Automated session summary (review conversation for details)\n\
         - Actions: Incremented counter; Recent commits: {commits}\n\
         - Key Decisions: [Add if needed]\n\
         - Files Modified: [List if known]\n\
         - Status: In Progress\n\
         - Next Steps: Continue session tasks\n",
        millis = now.timestamp_millis(),
        date = now.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Bump the counter stored in `path`.
///
/// The log must already exist. The file stays locked from read to write.
pub fn increment(
    path: &Path,
    reset_every: u64,
    commits: &dyn CommitSource,
    now: DateTime<Utc>,
) -> Result<IncrementOutcome, AppError> {
    fs::metadata(path).map_err(|source| AppError::ReadLog {
        path: path.to_path_buf(),
        source,
    })?;

    let _lock = LogLock::acquire(path, LOCK_TIMEOUT)?;
    let mut doc = LogDocument::read(path)?;

    let current = doc.session_counter_or_insert()?;
    let next = current
        .checked_add(1)
        .ok_or_else(|| AppError::InvalidCounter {
            value: current.to_string(),
        })?;

    let outcome = if next >= reset_every {
        let summary = commit_summary(commits, RECENT_COMMIT_COUNT);
        doc.set_session_counter(0);
        doc.append(&auto_entry(now, &summary));
        IncrementOutcome::EntryGenerated
    } else {
        doc.set_session_counter(next);
        IncrementOutcome::Incremented { counter: next }
    };

    write_atomic(path, doc.content())?;
    tracing::debug!("session counter {current} -> {outcome:?}");
    Ok(outcome)
}

/// Run the checker, then bump the counter and print the result
pub fn run(settings: &Settings) -> Result<(), AppError> {
    check::run(settings);

    let git = GitLog::for_log_file(&settings.log_file);
    let outcome = increment(&settings.log_file, settings.reset_every, &git, Utc::now())?;
    println!("{outcome}");
    Ok(())
}
