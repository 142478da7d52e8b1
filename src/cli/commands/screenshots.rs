//! screenshots commands - snapshot provisioning and suite execution

use crate::cli::args::{NoinstallArgs, ScreenshotsArgs};
use crate::config::{LocalConfig, TESTS_ROOT};
use crate::deps;
use crate::error::{JroboError, JroboResult};
use crate::site;
use crate::snapshot::{self, GitFetcher};
use console::style;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

/// Local cache of the upstream clone
const CACHE_DIR: &str = "cache";

/// Working copy the screenshots suite runs against
const SNAPSHOT_DIR: &str = "joomla-cms";

/// Execute the screenshots command
pub async fn execute(args: ScreenshotsArgs, config: Option<&LocalConfig>) -> JroboResult<()> {
    println!("Creating screenshots site");

    let branch = config
        .map(LocalConfig::branch_or_default)
        .unwrap_or("staging");

    snapshot::materialize(
        &GitFetcher,
        branch,
        Path::new(CACHE_DIR),
        Path::new(SNAPSHOT_DIR),
    )
    .await?;

    if args.use_htaccess {
        let snapshot = Path::new(SNAPSHOT_DIR);
        site::activate_htaccess(&snapshot.join("htaccess.txt"), snapshot).await?;
    }

    super::selenium::execute().await?;

    run_suite(&args.env).await
}

/// Execute the screenshots-noinstall command
pub async fn execute_noinstall(args: NoinstallArgs) -> JroboResult<()> {
    run_suite(&args.env).await
}

/// Regenerate the actor classes and run the screenshots suite
async fn run_suite(env: &str) -> JroboResult<()> {
    deps::ensure_composer().await?;

    codecept_build().await?;

    info!("Running screenshots suite in env {env}");
    let suite_path = format!("{TESTS_ROOT}/screenshots/");
    let status = Command::new("vendor/bin/codecept")
        .args(["run", "--steps", "--debug", "--fail-fast", "--env", env])
        .arg(&suite_path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| JroboError::command_failed("codecept run", e))?;

    if !status.success() {
        return Err(JroboError::command_exec(
            format!("codecept run --env {env} {suite_path}"),
            format!("exit status {}", status.code().unwrap_or(-1)),
        ));
    }

    println!("{} Screenshots suite finished", style("✓").green());
    Ok(())
}

/// `codecept build` regenerates the AcceptanceTester actor classes
async fn codecept_build() -> JroboResult<()> {
    let output = Command::new("php")
        .args(["vendor/bin/codecept", "build"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| JroboError::command_failed("php vendor/bin/codecept build", e))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(JroboError::command_exec(
            "php vendor/bin/codecept build",
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}
