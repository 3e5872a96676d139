use std::path::PathBuf;

use crate::cli::Cli;
use crate::consts::{DEFAULT_RESET_EVERY, DEFAULT_THRESHOLD_MINUTES, LOG_FILE_NAME};
use crate::error::AppError;
use crate::utils::Timezone;

/// Effective settings after merging CLI flags, config file and defaults
#[derive(Debug, Clone)]
pub struct Settings {
    pub log_file: PathBuf,
    pub threshold_minutes: u64,
    pub reset_every: u64,
    pub timezone: Timezone,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(LOG_FILE_NAME),
            threshold_minutes: DEFAULT_THRESHOLD_MINUTES,
            reset_every: DEFAULT_RESET_EVERY,
            timezone: Timezone::Local,
        }
    }
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let reset_every = cli.reset_every.unwrap_or(DEFAULT_RESET_EVERY);
        if reset_every == 0 {
            return Err(AppError::InvalidSetting {
                name: "reset_every",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            log_file: cli
                .log_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME)),
            threshold_minutes: cli.threshold.unwrap_or(DEFAULT_THRESHOLD_MINUTES),
            reset_every,
            timezone: Timezone::parse(cli.timezone.as_deref())?,
        })
    }
}
