//! Externally owned test-suite configuration
//!
//! Two YAML files are consumed read-only: the Codeception acceptance
//! suite (`tests/acceptance.suite.yml`) for the browser under test, and
//! the main `codeception.yml` for the per-OS driver path table. Only the
//! keys jrobo needs are modeled; everything else is ignored.

use crate::error::{JroboError, JroboResult};
use crate::webdriver::Os;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;

/// Suite file consumed for browser selection, relative to the
/// installation root
pub const SUITE_FILE: &str = "tests/acceptance.suite.yml";

/// Main Codeception configuration carrying the driver table
pub const CODECEPTION_FILE: &str = "codeception.yml";

/// Acceptance suite configuration (`tests/acceptance.suite.yml`)
#[derive(Debug, Deserialize)]
pub struct SuiteConfig {
    modules: Modules,
}

#[derive(Debug, Deserialize)]
struct Modules {
    config: ModuleConfig,
}

#[derive(Debug, Deserialize)]
struct ModuleConfig {
    #[serde(rename = "JoomlaBrowser")]
    joomla_browser: JoomlaBrowser,

    #[serde(rename = "AcceptanceHelper", default)]
    acceptance_helper: AcceptanceHelper,
}

#[derive(Debug, Deserialize)]
struct JoomlaBrowser {
    browser: String,
}

#[derive(Debug, Default, Deserialize)]
struct AcceptanceHelper {
    #[serde(rename = "MicrosoftEdgeInsiders", default, deserialize_with = "truthy")]
    microsoft_edge_insiders: bool,
}

impl SuiteConfig {
    /// Load and parse a suite file
    pub fn load(path: &Path) -> JroboResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| JroboError::SuiteConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_yaml::from_str(&content).map_err(|e| JroboError::SuiteConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Browser the suite drives, e.g. `chrome` or `MicrosoftEdge`
    pub fn browser(&self) -> &str {
        &self.modules.config.joomla_browser.browser
    }

    /// Whether the suite targets Edge Insiders builds
    pub fn edge_insiders(&self) -> bool {
        self.modules.config.acceptance_helper.microsoft_edge_insiders
    }
}

/// Main Codeception configuration (`codeception.yml`)
#[derive(Debug, Default, Deserialize)]
pub struct CodeceptionConfig {
    #[serde(default)]
    pub webdrivers: DriverTable,
}

impl CodeceptionConfig {
    /// Load and parse the main Codeception file
    pub fn load(path: &Path) -> JroboResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| JroboError::SuiteConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_yaml::from_str(&content).map_err(|e| JroboError::SuiteConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Driver executable paths, keyed by browser then OS family
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct DriverTable(HashMap<String, HashMap<String, String>>);

impl DriverTable {
    /// Path of the driver for `browser` on `os`, when one is configured
    pub fn path(&self, browser: &str, os: Os) -> Option<&str> {
        self.0
            .get(browser)
            .and_then(|by_os| by_os.get(os.key()))
            .map(String::as_str)
    }
}

/// The Insiders flag in the wild is boolean-ish: YAML bools, numbers and
/// strings like "true"/"1"/"yes" all count.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;

    Ok(match value {
        serde_yaml::Value::Bool(b) => b,
        serde_yaml::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_yaml::Value::String(s) => {
            matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
        }
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SUITE_YAML: &str = r#"
class_name: AcceptanceTester
modules:
    enabled:
        - JoomlaBrowser
        - AcceptanceHelper
    config:
        JoomlaBrowser:
            url: 'http://localhost/joomla-cms'
            browser: 'chrome'
        AcceptanceHelper:
            repo_folder: '.'
"#;

    #[test]
    fn suite_parses_browser() {
        let suite: SuiteConfig = serde_yaml::from_str(SUITE_YAML).unwrap();
        assert_eq!(suite.browser(), "chrome");
        assert!(!suite.edge_insiders());
    }

    #[test]
    fn insiders_flag_is_truthy() {
        for raw in ["true", "'1'", "'yes'", "1"] {
            let yaml = format!(
                "modules:\n  config:\n    JoomlaBrowser:\n      browser: MicrosoftEdge\n    AcceptanceHelper:\n      MicrosoftEdgeInsiders: {raw}\n"
            );
            let suite: SuiteConfig = serde_yaml::from_str(&yaml).unwrap();
            assert!(suite.edge_insiders(), "expected {raw} to be truthy");
        }

        for raw in ["false", "'0'", "0", "'off'"] {
            let yaml = format!(
                "modules:\n  config:\n    JoomlaBrowser:\n      browser: MicrosoftEdge\n    AcceptanceHelper:\n      MicrosoftEdgeInsiders: {raw}\n"
            );
            let suite: SuiteConfig = serde_yaml::from_str(&yaml).unwrap();
            assert!(!suite.edge_insiders(), "expected {raw} to be falsy");
        }
    }

    #[test]
    fn suite_load_errors_name_the_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("acceptance.suite.yml");
        let err = SuiteConfig::load(&missing).unwrap_err();
        assert!(err.to_string().contains("acceptance.suite.yml"));

        let invalid = temp.path().join("broken.yml");
        std::fs::write(&invalid, "modules: [not, what, we, expect]\n").unwrap();
        let err = SuiteConfig::load(&invalid).unwrap_err();
        assert!(matches!(err, crate::JroboError::SuiteConfigInvalid { .. }));
    }

    #[test]
    fn driver_table_lookup() {
        let config: CodeceptionConfig = serde_yaml::from_str(
            "webdrivers:\n  chrome:\n    linux: /usr/bin/chromedriver\n    windows: C:/chromedriver.exe\n",
        )
        .unwrap();

        assert_eq!(
            config.webdrivers.path("chrome", Os::Linux),
            Some("/usr/bin/chromedriver")
        );
        assert_eq!(config.webdrivers.path("chrome", Os::Mac), None);
        assert_eq!(config.webdrivers.path("firefox", Os::Linux), None);
    }

    #[test]
    fn codeception_without_webdrivers_is_empty() {
        let config: CodeceptionConfig = serde_yaml::from_str("paths:\n  tests: tests\n").unwrap();
        assert_eq!(config.webdrivers.path("chrome", Os::Linux), None);
    }
}
