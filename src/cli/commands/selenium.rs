//! run-selenium command - start the Selenium standalone server

use crate::error::{JroboError, JroboResult};
use crate::webdriver::DriverSpec;
use console::style;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::info;

/// Server output is appended here, relative to the installation root
const SELENIUM_LOG: &str = "selenium.log";

/// Launcher script installed by composer on unix-likes
const SELENIUM_BIN: &str = "vendor/bin/selenium-server-standalone";

/// Bundled server jar used on Windows
const SELENIUM_JAR: &str =
    r"vendor\joomla-projects\selenium-server-standalone\bin\selenium-server-standalone.jar";

/// How long the server gets to come up before the caller proceeds
const STARTUP_DELAY: Duration = Duration::from_secs(3);

/// Execute the run-selenium command
pub async fn execute() -> JroboResult<()> {
    let spec = super::webdriver::resolve_current()?;
    start(&spec).await
}

/// Start the Selenium server detached, with output appended to
/// `selenium.log`, then wait a fixed delay for startup. The child is
/// deliberately not awaited; the test runner talks to it over the wire
/// and CI tears it down with the job.
pub async fn start(spec: &DriverSpec) -> JroboResult<()> {
    info!("Starting Selenium with {}", spec.flag());

    let log = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(SELENIUM_LOG)
        .map_err(|e| JroboError::io(format!("opening {SELENIUM_LOG}"), e))?;
    let log_err = log
        .try_clone()
        .map_err(|e| JroboError::io(format!("opening {SELENIUM_LOG}"), e))?;

    let mut command = if cfg!(windows) {
        let mut command = Command::new("java.exe");
        command.arg(spec.flag()).arg("-jar").arg(SELENIUM_JAR);
        command
    } else {
        let mut command = Command::new(SELENIUM_BIN);
        command.arg(spec.flag());
        command
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err))
        .spawn()
        .map_err(|e| JroboError::command_failed("selenium-server-standalone", e))?;

    println!(
        "{} Selenium server starting, logging to {}",
        style("✓").green(),
        SELENIUM_LOG
    );

    tokio::time::sleep(STARTUP_DELAY).await;
    Ok(())
}
