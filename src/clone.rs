//! Shallow-cloning of remote repositories into per-query scratch directories.
//!
//! This is the acquisition collaborator in front of the traversal engine: it
//! materializes a local directory and nothing else. The clone runs `git` as a
//! subprocess with a hard wall-clock timeout; the engine itself never touches
//! the network.

use crate::error::DigestError;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
#[cfg(feature = "logging")]
use tracing;

/// Wall-clock ceiling for one clone subprocess, in seconds.
pub const CLONE_TIMEOUT_SECS: u64 = 60;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for cloning one repository.
#[derive(Debug, Clone)]
pub struct CloneConfig {
    pub url: String,
    pub local_path: PathBuf,
    pub branch: Option<String>,
}

/// Clones a repository to its local path.
///
/// Runs `git clone --single-branch --depth=1`, passing `--branch` only for
/// non-default branches. The subprocess is killed once
/// [`CLONE_TIMEOUT_SECS`] elapses.
pub fn clone_repo(config: &CloneConfig) -> Result<(), DigestError> {
    if let Some(parent) = config.local_path.parent() {
        fs::create_dir_all(parent).map_err(|e| DigestError::io(parent, e))?;
    }

    let mut command = Command::new("git");
    command.arg("clone").arg("--single-branch").arg("--depth=1");
    if let Some(branch) = &config.branch {
        if !matches!(branch.to_lowercase().as_str(), "main" | "master") {
            command.arg("--branch").arg(branch);
        }
    }
    command.arg(&config.url).arg(&config.local_path);
    command.stdout(Stdio::piped()).stderr(Stdio::piped());

    #[cfg(feature = "logging")]
    tracing::info!(
        "Cloning {} into {}",
        config.url,
        config.local_path.display()
    );

    let mut child = command
        .spawn()
        .map_err(|e| DigestError::CloneFailed(format!("failed to spawn git: {e}")))?;

    let deadline = Instant::now() + Duration::from_secs(CLONE_TIMEOUT_SECS);
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                if status.success() {
                    #[cfg(feature = "logging")]
                    tracing::info!("Clone of {} finished", config.url);
                    return Ok(());
                }
                let mut stderr = String::new();
                if let Some(mut pipe) = child.stderr.take() {
                    let _ = pipe.read_to_string(&mut stderr);
                }
                return Err(DigestError::CloneFailed(stderr.trim().to_string()));
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(DigestError::CloneTimeout(CLONE_TIMEOUT_SECS));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(DigestError::CloneFailed(format!(
                    "failed to wait for git: {e}"
                )));
            }
        }
    }
}
