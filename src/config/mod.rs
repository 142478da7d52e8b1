//! Local configuration for jrobo
//!
//! Settings live in an optional `jrobo.ini` next to the installation root:
//! flat `key=value` lines, no sections. A missing or unparseable file is
//! not an error; everything falls back to defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default location of the testing site, relative to the installation root
pub const TESTS_ROOT: &str = "tests";

/// File name of the optional local configuration
pub const CONFIG_FILE: &str = "jrobo.ini";

/// Local configuration, all fields optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalConfig {
    /// Custom path for the testing site
    pub cms_path: Option<PathBuf>,

    /// User/group spec for a `chown -R` after provisioning
    pub local_user: Option<String>,

    /// Upstream branch to clone for snapshot sites
    pub branch: Option<String>,
}

impl LocalConfig {
    /// Load the local configuration from `path`.
    ///
    /// Returns `None` when the file is missing or not parseable; both are
    /// degraded-but-valid states, logged and never fatal.
    pub fn load(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                info!("No local configuration file at {}", path.display());
                return None;
            }
        };

        match parse_flat_ini(&content) {
            Ok(values) => Some(Self::from_values(&values)),
            Err(line) => {
                warn!(
                    "Local configuration file {} is not in flat key=value format (line: {line:?})",
                    path.display()
                );
                None
            }
        }
    }

    fn from_values(values: &HashMap<String, String>) -> Self {
        Self {
            cms_path: values.get("cmsPath").map(PathBuf::from),
            local_user: values.get("localUser").cloned(),
            branch: values.get("branch").cloned(),
        }
    }

    /// Branch to clone for snapshot sites, `staging` when unset
    pub fn branch_or_default(&self) -> &str {
        self.branch.as_deref().unwrap_or("staging")
    }
}

/// Parse flat INI content (`key=value` per line, `;`/`#` comments).
///
/// Unknown keys are kept; the caller picks out the ones it recognizes.
/// Returns the offending line when a non-comment line has no `=`.
fn parse_flat_ini(content: &str) -> Result<HashMap<String, String>, String> {
    let mut values = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| line.to_string())?;
        let value = value.trim().trim_matches('"').trim_matches('\'');
        values.insert(key.trim().to_string(), value.to_string());
    }

    Ok(values)
}

/// Resolve the path the testing site lives at.
///
/// A configured `cmsPath` wins only when its parent directory exists;
/// otherwise the default `tests/joomla-cms` is used. Resolved once at
/// startup and passed by value from there on.
pub fn resolve_testing_path(config: Option<&LocalConfig>) -> PathBuf {
    let default = Path::new(TESTS_ROOT).join("joomla-cms");

    let Some(custom) = config.and_then(|c| c.cms_path.as_ref()) else {
        return default;
    };

    // a bare file name has the cwd as its parent
    let parent = match custom.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if parent.exists() {
        custom.clone()
    } else {
        warn!(
            "CMS path {} from local configuration does not exist or is not readable, using default",
            custom.display()
        );
        default
    }
}
