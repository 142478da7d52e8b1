//! Snapshot cache for screenshot-mode provisioning
//!
//! Cloning the upstream CMS on every run is slow and rate-limited, so a
//! shallow clone is kept in a local cache directory and refreshed only
//! when older than a day. The working copy is always rebuilt from the
//! cache, stale or not.

use crate::error::{JroboError, JroboResult};
use crate::site;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

/// Cache refreshes are skipped while it is younger than this
pub const STALE_AFTER: Duration = Duration::from_secs(60 * 60 * 24);

/// Upstream repository the snapshot is cloned from
pub const UPSTREAM_URL: &str = "https://github.com/joomla/joomla-cms.git";

/// Fetches an upstream tree into a local directory
#[async_trait]
pub trait SnapshotFetcher {
    /// Fetch `branch` of the upstream tree into `dest`
    async fn fetch(&self, branch: &str, dest: &Path) -> JroboResult<()>;
}

/// Fetcher shelling out to `git clone`, shallow and single-branch
pub struct GitFetcher;

#[async_trait]
impl SnapshotFetcher for GitFetcher {
    async fn fetch(&self, branch: &str, dest: &Path) -> JroboResult<()> {
        info!("Cloning {} branch {}", UPSTREAM_URL, branch);

        let output = Command::new("git")
            .args(["clone", "-b", branch, "--single-branch", "--depth", "1", UPSTREAM_URL])
            .arg(dest)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| JroboError::command_failed("git clone", e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(JroboError::command_exec(
                format!("git clone -b {branch} {UPSTREAM_URL}"),
                String::from_utf8_lossy(&output.stderr),
            ))
        }
    }
}

/// Whether the cache directory is missing or older than `max_age`
pub fn is_stale(cache_dir: &Path, max_age: Duration) -> bool {
    match cache_mtime(cache_dir) {
        Some(mtime) => SystemTime::now()
            .duration_since(mtime)
            .map(|age| age > max_age)
            .unwrap_or(false),
        None => true,
    }
}

fn cache_mtime(cache_dir: &Path) -> Option<SystemTime> {
    std::fs::metadata(cache_dir).and_then(|m| m.modified()).ok()
}

/// Materialize a fresh working copy of the upstream tree.
///
/// Refreshes the cache first when it is absent or stale (delete, then
/// refetch; a stale cache is never merged). The working directory is
/// deleted and fully re-copied from the cache on every call, with no
/// exclusions. An undeletable working directory is fatal.
pub async fn materialize(
    fetcher: &dyn SnapshotFetcher,
    branch: &str,
    cache_dir: &Path,
    working_dir: &Path,
) -> JroboResult<()> {
    if is_stale(cache_dir, STALE_AFTER) {
        if cache_dir.exists() {
            debug!("Snapshot cache is stale, discarding");
            fs::remove_dir_all(cache_dir)
                .await
                .map_err(|e| JroboError::UndeletableDir {
                    path: cache_dir.to_path_buf(),
                    source: e,
                })?;
        }

        fetcher.fetch(branch, cache_dir).await?;
    } else if let Some(mtime) = cache_mtime(cache_dir) {
        let fetched: DateTime<Local> = mtime.into();
        info!(
            "Reusing snapshot cache fetched {}",
            fetched.format("%Y-%m-%d %H:%M")
        );
    }

    site::clean_site(working_dir).await?;
    site::copy_tree(cache_dir, working_dir, &[]).await?;

    info!("Joomla snapshot site created at {}", working_dir.display());
    Ok(())
}
