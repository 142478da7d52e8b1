//! WebDriver resolution
//!
//! Maps the configured browser and the host operating system to the
//! native driver binary Selenium should load, and formats the result as
//! the `-D<key>=<path>` system-property flag the standalone server takes.

pub mod suite;

use crate::error::{JroboError, JroboResult};
use std::fmt;

pub use suite::{CodeceptionConfig, DriverTable, SuiteConfig};

/// Browser name to Selenium driver-type key. The mapping is data, not
/// control flow; browser names match case-sensitively.
const DRIVER_TYPES: &[(&str, &str)] = &[
    ("chrome", "webdriver.chrome.driver"),
    ("firefox", "webdriver.gecko.driver"),
    ("MicrosoftEdge", "webdriver.edge.driver"),
    ("internet explorer", "webdriver.ie.driver"),
];

/// Host operating system family, as the driver table keys it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    Mac,
    Linux,
}

impl Os {
    /// Classify an OS name string. Total: anything that is neither
    /// Windows nor a Darwin/mac flavor is treated as Linux.
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();

        if name.contains("windows") {
            Self::Windows
        } else if name.contains("darwin") || name.contains("mac") {
            Self::Mac
        } else {
            Self::Linux
        }
    }

    /// The OS family the running system reports
    pub fn current() -> Self {
        Self::classify(std::env::consts::OS)
    }

    /// Key used in the `webdrivers` lookup table
    pub fn key(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Mac => "mac",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One resolved automation driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSpec {
    /// Selenium system-property key, e.g. `webdriver.gecko.driver`
    pub type_key: &'static str,

    /// Path of the driver executable on this host
    pub path: String,
}

impl DriverSpec {
    /// Launch flag for the Selenium standalone server
    pub fn flag(&self) -> String {
        format!("-D{}={}", self.type_key, self.path)
    }
}

/// Resolve the driver for `browser` on `os`.
///
/// When the browser is MicrosoftEdge and the Insiders flag is set, the
/// path lookup switches to the `MicrosoftEdgeInsiders` table row while
/// the driver type key stays `webdriver.edge.driver`. An unknown browser
/// or a missing table entry is fatal; tests against the wrong driver
/// would produce misleading results.
pub fn resolve_driver(
    browser: &str,
    insiders: bool,
    drivers: &DriverTable,
    os: Os,
) -> JroboResult<DriverSpec> {
    let type_key = DRIVER_TYPES
        .iter()
        .find(|(name, _)| *name == browser)
        .map(|(_, key)| *key)
        .ok_or_else(|| JroboError::UnknownBrowser(browser.to_string()))?;

    let effective = if browser == "MicrosoftEdge" && insiders {
        "MicrosoftEdgeInsiders"
    } else {
        browser
    };

    let path = drivers
        .path(effective, os)
        .ok_or_else(|| JroboError::DriverPathMissing {
            browser: effective.to_string(),
            os: os.to_string(),
        })?;

    Ok(DriverSpec {
        type_key,
        path: path.to_string(),
    })
}
