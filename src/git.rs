//! Recent-commit summaries for auto-generated entries

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::consts::NO_RECENT_COMMITS;
use crate::error::GitError;

/// Provider of a short recent-history summary
pub trait CommitSource {
    /// One line per commit, newest first
    fn recent_commits(&self, count: usize) -> Result<String, GitError>;
}

/// `git log --oneline` run next to the log file
#[derive(Debug, Clone, Default)]
pub struct GitLog {
    repo_dir: Option<PathBuf>,
}

impl GitLog {
    pub fn new(repo_dir: Option<PathBuf>) -> Self {
        Self { repo_dir }
    }

    /// Run git in the directory that holds `log_path`
    pub fn for_log_file(log_path: &Path) -> Self {
        let repo_dir = log_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Self::new(repo_dir)
    }
}

impl CommitSource for GitLog {
    fn recent_commits(&self, count: usize) -> Result<String, GitError> {
        let count = count.to_string();
        let mut cmd = Command::new("git");
        cmd.args(["log", "-n", count.as_str(), "--oneline"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::NotFound
            } else {
                GitError::Spawn(e)
            }
        })?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(GitError::Utf8)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(GitError::Failed(stderr.trim().to_string()))
        }
    }
}

/// Summary line for an auto-generated entry; failures degrade to a placeholder.
pub fn commit_summary(source: &dyn CommitSource, count: usize) -> String {
    match source.recent_commits(count) {
        Ok(out) if !out.trim().is_empty() => out.trim().to_string(),
        Ok(_) => NO_RECENT_COMMITS.to_string(),
        Err(e) => {
            tracing::debug!("commit summary unavailable: {e}");
            NO_RECENT_COMMITS.to_string()
        }
    }
}
