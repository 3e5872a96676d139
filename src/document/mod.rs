//! Progress log document model
//!
//! The log is free-form markdown. Only two structures are recognised: the
//! `Session Counter: N` header and entries opened by `## Entry #`.

pub mod timestamp;

use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::consts::{COUNTER_LABEL, ENTRY_MARKER};
use crate::error::AppError;

pub use timestamp::{TimestampMatch, TimestampSource, find_timestamp, parse_timestamp};

static COUNTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{} ([0-9]+)", regex::escape(COUNTER_LABEL)))
        .expect("counter pattern is valid")
});

/// In-memory copy of the log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDocument {
    content: String,
}

impl LogDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, AppError> {
        fs::read_to_string(path)
            .map(Self::new)
            .map_err(|source| AppError::ReadLog {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Entries in file order; text before the first marker is skipped
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.content.split(ENTRY_MARKER).skip(1)
    }

    /// The first entry in the file, which is the most recent by convention
    pub fn latest_entry(&self) -> Option<&str> {
        self.entries().next()
    }

    /// Value of the first `Session Counter:` header, if any.
    pub fn session_counter(&self) -> Result<Option<u64>, AppError> {
        let Some(caps) = COUNTER_RE.captures(&self.content) else {
            return Ok(None);
        };
        let digits = &caps[1];
        digits
            .parse::<u64>()
            .map(Some)
            .map_err(|_| AppError::InvalidCounter {
                value: digits.to_string(),
            })
    }

    /// Read the counter, prepending a zeroed header when the file has none.
    pub fn session_counter_or_insert(&mut self) -> Result<u64, AppError> {
        if let Some(counter) = self.session_counter()? {
            return Ok(counter);
        }
        tracing::debug!("no counter header found, inserting one");
        self.content = format!("{COUNTER_LABEL} 0\n\n{}", self.content);
        Ok(0)
    }

    /// Rewrite the first counter header in place
    pub fn set_session_counter(&mut self, value: u64) {
        let replacement = format!("{COUNTER_LABEL} {value}");
        self.content = COUNTER_RE
            .replace(&self.content, NoExpand(&replacement))
            .into_owned();
    }

    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }
}
