//! Third-party tool acquisition and the CMS build step
//!
//! Thin wrappers around external commands. Download retries are curl's
//! own (`--retry`), not ours.

use crate::config::TESTS_ROOT;
use crate::error::{JroboError, JroboResult};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

const COMPOSER_URL: &str = "https://getcomposer.org/composer.phar";

/// Make sure `tests/composer.phar` exists, downloading it when missing
pub async fn ensure_composer() -> JroboResult<()> {
    let phar = Path::new(TESTS_ROOT).join("composer.phar");

    if phar.exists() {
        debug!("composer.phar already present");
        return Ok(());
    }

    info!("Downloading composer.phar");
    let output = Command::new("curl")
        .arg("-o")
        .arg(&phar)
        .args(["--retry", "3", "--retry-delay", "5", "-sS", COMPOSER_URL])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| JroboError::command_failed("curl", e))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(JroboError::command_exec(
            format!("curl -o {} {}", phar.display(), COMPOSER_URL),
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}

/// Run the composer build step for the installation root.
///
/// A tree without a composer.json has nothing to build; that is the
/// normal case for snapshot working copies and is skipped silently.
pub async fn build() -> JroboResult<()> {
    if !Path::new("composer.json").exists() {
        debug!("No composer.json, skipping build step");
        return Ok(());
    }

    ensure_composer().await?;

    info!("Running composer install");
    let phar = Path::new(TESTS_ROOT).join("composer.phar");
    let output = Command::new("php")
        .arg(&phar)
        .arg("install")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| JroboError::command_failed("php composer.phar install", e))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(JroboError::command_exec(
            "php composer.phar install",
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}
