//! Elapsed-time checker
//!
//! Best effort by contract: every failure (missing file, unreadable content,
//! bad metadata) means "no reminder" and never reaches the caller.

use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::consts::LOG_FILE_NAME;
use crate::document::{LogDocument, TimestampMatch, find_timestamp, parse_timestamp};
use crate::error::AppError;
use crate::settings::Settings;

const BANNER_WIDTH: usize = 70;

const CHECKLIST: &[&str] = &[
    "Current implementation plan step (reference specific step):",
    "Files created/modified since last log (list actual filenames):",
    "Commands executed with their results (copy/paste outputs):",
    "Specific errors encountered (exact error messages):",
    "Next concrete step in the plan:",
    "Git commits made (commit hashes and messages):",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderReason {
    NoEntries,
    Elapsed { minutes: i64 },
}

impl fmt::Display for ReminderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderReason::NoEntries => f.write_str("No previous log entries found"),
            ReminderReason::Elapsed { minutes } => {
                write!(f, "{minutes} minutes since last log entry")
            }
        }
    }
}

/// Prompt asking the operator to write a new entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub reason: ReminderReason,
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(BANNER_WIDTH);
        writeln!(f)?;
        writeln!(f, "{banner}")?;
        writeln!(f, "🕐 PROGRESS LOG ENTRY NEEDED")?;
        writeln!(f, "Reason: {}", self.reason)?;
        writeln!(f)?;
        writeln!(f, "Please provide evidence-based progress update:")?;
        for item in CHECKLIST {
            writeln!(f, "• {item}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Add entry manually to {LOG_FILE_NAME} using evidence-based format"
        )?;
        writeln!(f, "{banner}")
    }
}

/// Decide whether a reminder is due at `now`.
pub fn check_log_need(settings: &Settings, now: DateTime<Utc>) -> Option<Reminder> {
    match evaluate(settings, now) {
        Ok(reminder) => reminder,
        Err(e) => {
            tracing::debug!("log check skipped: {e}");
            None
        }
    }
}

fn evaluate(settings: &Settings, now: DateTime<Utc>) -> Result<Option<Reminder>, AppError> {
    let path = settings.log_file.as_path();
    let doc = LogDocument::read(path)?;

    let Some(latest) = doc.latest_entry() else {
        return Ok(Some(Reminder {
            reason: ReminderReason::NoEntries,
        }));
    };

    let last_logged = match entry_timestamp(latest, settings) {
        Some(ts) => ts,
        None => modified_time(path)?,
    };

    let minutes = (now - last_logged).num_milliseconds() as f64 / 60_000.0;
    tracing::debug!(
        "last entry at {}, {minutes:.1} minutes ago",
        last_logged.to_rfc3339()
    );

    if minutes >= settings.threshold_minutes as f64 {
        Ok(Some(Reminder {
            reason: ReminderReason::Elapsed {
                minutes: minutes.round() as i64,
            },
        }))
    } else {
        Ok(None)
    }
}

fn entry_timestamp(entry: &str, settings: &Settings) -> Option<DateTime<Utc>> {
    match find_timestamp(entry) {
        TimestampMatch::Found { source, raw } => {
            let parsed = parse_timestamp(raw, settings.timezone);
            if parsed.is_none() {
                tracing::debug!("unparseable {source:?} value {raw:?}, using file mtime");
            }
            parsed
        }
        TimestampMatch::NotFound => {
            tracing::debug!("latest entry has no timestamp, using file mtime");
            None
        }
    }
}

fn modified_time(path: &Path) -> Result<DateTime<Utc>, AppError> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(DateTime::<Utc>::from)
        .map_err(|source| AppError::ReadLog {
            path: path.to_path_buf(),
            source,
        })
}

/// Run the check and print the reminder, if any
pub fn run(settings: &Settings) {
    if let Some(reminder) = check_log_need(settings, Utc::now()) {
        write_reminder(&mut std::io::stdout().lock(), &reminder);
    }
}

// A closed stdout (e.g. `| head -1`) must not abort the caller
fn write_reminder(out: &mut impl Write, reminder: &Reminder) {
    if let Err(e) = writeln!(out, "{reminder}").and_then(|()| out.flush()) {
        tracing::debug!("reminder not printed: {e}");
    }
}

/// Entry point for programs that embed the check at startup.
///
/// Resolves settings from the config file alone and stays silent on any
/// failure, including a bad config.
pub fn run_best_effort() {
    let cli = Cli::for_command(Commands::Check).with_config(&Config::load_quiet());
    match Settings::from_cli(&cli) {
        Ok(settings) => run(&settings),
        Err(e) => tracing::debug!("log check skipped: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Timezone;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse::<DateTime<Utc>>().unwrap()
    }

    fn settings_for(log_file: PathBuf) -> Settings {
        Settings {
            log_file,
            timezone: Timezone::Named(chrono_tz::UTC),
            ..Settings::default()
        }
    }

    fn write_log(content: &str) -> (tempfile::TempDir, Settings) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, content).unwrap();
        let settings = settings_for(path);
        (dir, settings)
    }

    #[test]
    fn no_entries_always_reminds() {
        let (_dir, settings) = write_log("Session Counter: 2\n\n# Progress\n");
        let reminder = check_log_need(&settings, utc("2024-01-01T00:00:00Z")).unwrap();
        assert_eq!(reminder.reason, ReminderReason::NoEntries);
        assert!(reminder.to_string().contains("Reason: No previous log entries found"));
    }

    #[test]
    fn twenty_minutes_after_date_field() {
        let (_dir, settings) =
            write_log("# Progress\n\n## Entry #4 - Parser\nDate: 2024-01-01T00:00:00\n");
        let reminder = check_log_need(&settings, utc("2024-01-01T00:20:00Z")).unwrap();
        assert_eq!(reminder.reason, ReminderReason::Elapsed { minutes: 20 });
        assert!(
            reminder
                .to_string()
                .contains("Reason: 20 minutes since last log entry")
        );
    }

    #[test]
    fn recent_entry_is_quiet() {
        let (_dir, settings) =
            write_log("## Entry #4 - Parser\nDate: 2024-01-01T00:00:00Z\n");
        assert!(check_log_need(&settings, utc("2024-01-01T00:14:59Z")).is_none());
    }

    #[test]
    fn threshold_is_inclusive() {
        let (_dir, settings) = write_log("## Entry #1 - Start\n2024-01-01 00:00\n");
        let reminder = check_log_need(&settings, utc("2024-01-01T00:15:00Z")).unwrap();
        assert_eq!(reminder.reason, ReminderReason::Elapsed { minutes: 15 });
    }

    #[test]
    fn elapsed_minutes_are_rounded() {
        let (_dir, settings) = write_log("## Entry #1 - Start\n2024-01-01T00:00:00\n");
        let reminder = check_log_need(&settings, utc("2024-01-01T00:20:31Z")).unwrap();
        assert_eq!(reminder.reason, ReminderReason::Elapsed { minutes: 21 });
    }

    #[test]
    fn only_the_first_entry_counts() {
        let (_dir, settings) = write_log(
            "## Entry #2 - Newer\nDate: 2024-01-01T10:00:00Z\n\n## Entry #1 - Older\nDate: 2023-01-01T00:00:00Z\n",
        );
        assert!(check_log_need(&settings, utc("2024-01-01T10:05:00Z")).is_none());
    }

    #[test]
    fn custom_threshold() {
        let (_dir, mut settings) = write_log("## Entry #1\nDate: 2024-01-01T00:00:00Z\n");
        settings.threshold_minutes = 60;
        assert!(check_log_need(&settings, utc("2024-01-01T00:45:00Z")).is_none());
        assert!(check_log_need(&settings, utc("2024-01-01T01:00:00Z")).is_some());
    }

    #[test]
    fn missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(dir.path().join("missing.md"));
        assert!(check_log_need(&settings, Utc::now()).is_none());
    }

    #[test]
    fn invalid_utf8_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(check_log_need(&settings_for(path), Utc::now()).is_none());
    }

    #[test]
    fn unparseable_date_field_falls_back_to_mtime() {
        // The Date field matches first, so the valid ISO stamp below is ignored
        let (_dir, settings) =
            write_log("## Entry #1\nDate: whenever\nat 2020-01-01T00:00:00\n");
        let file = fs::File::options()
            .write(true)
            .open(&settings.log_file)
            .unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(40 * 60))
            .unwrap();
        drop(file);

        let reminder = check_log_need(&settings, Utc::now()).unwrap();
        assert_eq!(reminder.reason, ReminderReason::Elapsed { minutes: 40 });
    }

    #[test]
    fn fresh_file_without_timestamp_is_quiet() {
        let (_dir, settings) = write_log("## Entry #1 - No date\nworked on things\n");
        assert!(check_log_need(&settings, Utc::now()).is_none());
    }

    #[test]
    fn zone_suffixed_date_field_is_honoured() {
        let (_dir, mut settings) =
            write_log("## Entry #9 - Deploy\nDate: 2024-01-15 14:30 UTC\n");
        settings.timezone = Timezone::parse(Some("Asia/Tokyo")).unwrap();
        let reminder = check_log_need(&settings, utc("2024-01-15T15:00:00Z")).unwrap();
        assert_eq!(reminder.reason, ReminderReason::Elapsed { minutes: 30 });
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn closed_stdout_does_not_panic() {
        let reminder = Reminder {
            reason: ReminderReason::NoEntries,
        };
        write_reminder(&mut ClosedPipe, &reminder);
    }

    #[test]
    fn reminder_is_followed_by_blank_line() {
        let reminder = Reminder {
            reason: ReminderReason::Elapsed { minutes: 42 },
        };
        let mut out = Vec::new();
        write_reminder(&mut out, &reminder);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\n===="));
        assert!(text.ends_with(&format!("{}\n\n", "=".repeat(70))));
        assert!(text.contains("Reason: 42 minutes since last log entry"));
    }

    #[test]
    fn reminder_layout() {
        let text = Reminder {
            reason: ReminderReason::NoEntries,
        }
        .to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(70));
        assert_eq!(lines[2], "🕐 PROGRESS LOG ENTRY NEEDED");
        assert_eq!(lines[3], "Reason: No previous log entries found");
        assert_eq!(lines[5], "Please provide evidence-based progress update:");
        assert_eq!(
            lines[6],
            "• Current implementation plan step (reference specific step):"
        );
        assert_eq!(lines[11], "• Git commits made (commit hashes and messages):");
        assert_eq!(
            lines[13],
            "Add entry manually to PROJECT-PROGRESS-LOG.md using evidence-based format"
        );
        assert_eq!(lines[14], "=".repeat(70));
        assert_eq!(lines.len(), 15);
    }
}
