//! get-webdriver command - print the resolved driver flag

use crate::error::JroboResult;
use crate::webdriver::suite::{CODECEPTION_FILE, SUITE_FILE};
use crate::webdriver::{resolve_driver, CodeceptionConfig, DriverSpec, Os, SuiteConfig};
use std::path::Path;

/// Resolve the driver for the suite-configured browser on the host OS
pub fn resolve_current() -> JroboResult<DriverSpec> {
    let suite = SuiteConfig::load(Path::new(SUITE_FILE))?;
    let codeception = CodeceptionConfig::load(Path::new(CODECEPTION_FILE))?;

    resolve_driver(
        suite.browser(),
        suite.edge_insiders(),
        &codeception.webdrivers,
        Os::current(),
    )
}

/// Execute the get-webdriver command
pub async fn execute() -> JroboResult<()> {
    println!("{}", resolve_current()?.flag());
    Ok(())
}
