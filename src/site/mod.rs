//! Testing-site assembly
//!
//! Builds a disposable copy of the CMS tree: a filtered recursive copy of
//! the installation root, optional ownership fix, optional `.htaccess`
//! activation. Exclusion filtering applies at the top level of a copy
//! only; everything below the root is copied unfiltered.

use crate::error::{JroboError, JroboResult};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

/// Top-level entries never copied into a testing site
pub const SITE_EXCLUDES: &[&str] = &["tests", "tests-phpunit", ".run", ".github", ".git"];

/// Copy `src` into `dst`, skipping top-level entries named in `exclude`.
///
/// `dst` and missing intermediate directories are created. Entries below
/// the top level are copied unfiltered, so a nested directory that happens
/// to share a name with an excluded entry is still copied. Pre-existing
/// unrelated content in `dst` is left alone.
pub async fn copy_tree(src: &Path, dst: &Path, exclude: &[&str]) -> JroboResult<()> {
    let mut entries = fs::read_dir(src)
        .await
        .map_err(|e| JroboError::SourceUnreadable {
            path: src.to_path_buf(),
            source: e,
        })?;

    fs::create_dir_all(dst)
        .await
        .map_err(|e| JroboError::io(format!("creating directory {}", dst.display()), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| JroboError::io(format!("listing {}", src.display()), e))?
    {
        let name = entry.file_name();
        if exclude.iter().any(|ex| name == *ex) {
            debug!("Skipping excluded entry {:?}", name);
            continue;
        }

        let entry_src = entry.path();
        let entry_dst = dst.join(&name);

        let file_type = entry
            .file_type()
            .await
            .map_err(|e| JroboError::io(format!("inspecting {}", entry_src.display()), e))?;

        if file_type.is_dir() {
            fs::create_dir_all(&entry_dst)
                .await
                .map_err(|e| JroboError::io(format!("creating {}", entry_dst.display()), e))?;
            copy_dir_boxed(entry_src, entry_dst).await?;
        } else {
            fs::copy(&entry_src, &entry_dst)
                .await
                .map_err(|e| JroboError::io(format!("copying {}", entry_src.display()), e))?;
        }
    }

    Ok(())
}

/// Unfiltered recursive copy of a directory's contents
async fn copy_dir(src: &Path, dst: &Path) -> JroboResult<()> {
    let mut entries = fs::read_dir(src)
        .await
        .map_err(|e| JroboError::io(format!("listing {}", src.display()), e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| JroboError::io(format!("listing {}", src.display()), e))?
    {
        let entry_src = entry.path();
        let entry_dst = dst.join(entry.file_name());

        let file_type = entry
            .file_type()
            .await
            .map_err(|e| JroboError::io(format!("inspecting {}", entry_src.display()), e))?;

        if file_type.is_dir() {
            fs::create_dir_all(&entry_dst)
                .await
                .map_err(|e| JroboError::io(format!("creating {}", entry_dst.display()), e))?;
            copy_dir_boxed(entry_src, entry_dst).await?;
        } else {
            fs::copy(&entry_src, &entry_dst)
                .await
                .map_err(|e| JroboError::io(format!("copying {}", entry_src.display()), e))?;
        }
    }

    Ok(())
}

/// Boxed wrapper so `copy_dir` can recurse without a recursive async fn
fn copy_dir_boxed(
    src: PathBuf,
    dst: PathBuf,
) -> Pin<Box<dyn Future<Output = JroboResult<()>> + Send>> {
    Box::pin(async move { copy_dir(&src, &dst).await })
}

/// Remove a stale testing site if present.
///
/// Deletion failure is fatal: a partially deleted site would corrupt the
/// next test run, so the caller aborts instead of retrying.
pub async fn clean_site(path: &Path) -> JroboResult<()> {
    if !path.exists() {
        return Ok(());
    }

    info!("Removing old testing site at {}", path.display());
    fs::remove_dir_all(path)
        .await
        .map_err(|e| JroboError::UndeletableDir {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Run `chown -R <user> <path>` to fix permissions on the copied site
pub async fn fix_ownership(path: &Path, user: &str) -> JroboResult<()> {
    info!("Changing ownership of {} to {}", path.display(), user);

    let output = Command::new("chown")
        .arg("-R")
        .arg(user)
        .arg(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| JroboError::command_failed("chown", e))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(JroboError::command_exec(
            format!("chown -R {} {}", user, path.display()),
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}

/// Activate the embedded `.htaccess` in the testing site.
///
/// Copies `source` (the shipped `htaccess.txt`) into the site and
/// rewrites the commented `RewriteBase` line for the site's base path.
pub async fn activate_htaccess(source: &Path, site: &Path) -> JroboResult<()> {
    let target = site.join(".htaccess");

    info!("Renaming {} to .htaccess", source.display());
    let content = fs::read_to_string(source)
        .await
        .map_err(|e| JroboError::io(format!("reading {}", source.display()), e))?;

    let content = content.replace("# RewriteBase /", "RewriteBase joomla-cms/");

    fs::write(&target, content)
        .await
        .map_err(|e| JroboError::io(format!("writing {}", target.display()), e))
}
