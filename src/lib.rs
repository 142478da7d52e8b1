//! jrobo - Joomla browser-test provisioning
//!
//! Provisions a disposable copy of the Joomla CMS tree for automated
//! browser testing and resolves the Selenium WebDriver for the host OS.

pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod site;
pub mod snapshot;
pub mod webdriver;

pub use error::{JroboError, JroboResult};
