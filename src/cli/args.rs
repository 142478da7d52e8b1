//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};

/// jrobo - Joomla browser-test provisioning
///
/// Provisions a disposable testing copy of the CMS tree and resolves
/// the Selenium WebDriver for the host operating system.
#[derive(Parser, Debug)]
#[command(name = "jrobo")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a testing Joomla site from the current source tree
    CreateTestingSite(CreateArgs),

    /// Start the Selenium standalone server for the configured browser
    RunSelenium,

    /// Provision a snapshot site and run the screenshots suite
    Screenshots(ScreenshotsArgs),

    /// Run the screenshots suite against an already provisioned site
    ScreenshotsNoinstall(NoinstallArgs),

    /// Print the resolved -D<driver>=<path> flag for Selenium
    GetWebdriver,
}

/// Arguments for the create-testing-site command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Rename and enable the embedded Joomla .htaccess file
    #[arg(long)]
    pub use_htaccess: bool,
}

/// Arguments for the screenshots command
#[derive(Parser, Debug)]
pub struct ScreenshotsArgs {
    /// Rename and enable the embedded Joomla .htaccess file
    #[arg(long)]
    pub use_htaccess: bool,

    /// Codeception environment to run the suite in
    #[arg(long, default_value = "desktop")]
    pub env: String,
}

/// Arguments for the screenshots-noinstall command
#[derive(Parser, Debug)]
pub struct NoinstallArgs {
    /// Codeception environment to run the suite in
    #[arg(long, default_value = "desktop")]
    pub env: String,
}
