//! On-disk persistence for the log file
//!
//! Writers hold a sidecar `<log>.lock` file for the whole read-modify-write
//! and replace the log through a temporary sibling plus rename.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::error::AppError;

pub const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Locks older than this are assumed to belong to a crashed process
const STALE_LOCK_AGE: Duration = Duration::from_secs(30);

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive lock on a log file, released on drop
#[derive(Debug)]
pub struct LogLock {
    path: PathBuf,
}

impl LogLock {
    pub fn lock_path(log_path: &Path) -> PathBuf {
        let mut name = log_path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    pub fn acquire(log_path: &Path, timeout: Duration) -> Result<Self, AppError> {
        let lock_path = Self::lock_path(log_path);
        let started = Instant::now();
        loop {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&lock_path)
            {
                Ok(mut file) => {
                    let _ = write!(file, "{}", std::process::id());
                    tracing::debug!("acquired {}", lock_path.display());
                    return Ok(Self { path: lock_path });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    evict_stale_lock(&lock_path);
                    if started.elapsed() > timeout {
                        return Err(AppError::LockTimeout { path: lock_path });
                    }
                    std::thread::sleep(LOCK_POLL_INTERVAL);
                }
                Err(source) => {
                    return Err(AppError::Lock {
                        path: lock_path,
                        source,
                    });
                }
            }
        }
    }
}

impl Drop for LogLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("failed to release {}: {e}", self.path.display());
        }
    }
}

fn evict_stale_lock(lock_path: &Path) {
    let Some(age) = fs::metadata(lock_path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
    else {
        return;
    };

    if age > STALE_LOCK_AGE {
        tracing::warn!(
            "removing stale lock {} ({}s old)",
            lock_path.display(),
            age.as_secs()
        );
        let _ = fs::remove_file(lock_path);
    }
}

/// Replace `path` with `content` via a temporary sibling and rename.
///
/// Symlinks are followed so the link survives and its target is updated.
/// The target's permissions carry over to the new file.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), AppError> {
    let write_err = |source| AppError::WriteLog {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let mut tmp_name = target.as_os_str().to_owned();
    tmp_name.push(format!(".{}-{nanos}.tmp", std::process::id()));
    let tmp_path = PathBuf::from(tmp_name);

    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        if let Some(permissions) = permissions {
            fs::set_permissions(&tmp_path, permissions)?;
        }
        fs::rename(&tmp_path, &target)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result.map_err(write_err)
}
