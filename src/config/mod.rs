//! User configuration: external tool path and picture increments.
//!
//! Read from `<config-dir>/dctl/config.toml` when present, with environment
//! overrides for the increments. Increments are kept as free-form strings
//! and parsed on use, falling back to the default when missing or
//! unparsable.
//!
//! ```toml
//! tool = "/Applications/BetterDisplay.app/Contents/MacOS/BetterDisplay"
//! brightness-increment = "0.1"
//! contrast-increment = "0.05"
//! ```

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DctlError, Result, ResultExt};

/// Step applied by `--up`/`--down` when the user configured none.
pub const DEFAULT_INCREMENT: f64 = 0.05;

/// User-adjustable settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Path to the external display management binary.
    #[serde(default)]
    pub tool: Option<PathBuf>,

    /// Brightness step for `--up`/`--down`, as a free-form numeric string.
    #[serde(default)]
    pub brightness_increment: Option<String>,

    /// Contrast step for `--up`/`--down`, as a free-form numeric string.
    #[serde(default)]
    pub contrast_increment: Option<String>,
}

impl Settings {
    /// Default config file location, when a config directory exists.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("dctl").join("config.toml"))
    }

    /// Load settings from the default location plus environment overrides.
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn load() -> Result<Self> {
        let mut settings = match Self::config_path() {
            Some(path) if path.is_file() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        settings.apply_env();
        Ok(settings)
    }

    /// Load settings from a specific file, without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config file");
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&contents).map_err(|e| DctlError::ConfigParse(e.to_string()))
    }

    /// Overlay increment overrides from the environment.
    fn apply_env(&mut self) {
        if let Ok(v) = env::var("DCTL_BRIGHTNESS_INCREMENT") {
            self.brightness_increment = Some(v);
        }
        if let Ok(v) = env::var("DCTL_CONTRAST_INCREMENT") {
            self.contrast_increment = Some(v);
        }
    }

    /// Effective brightness step.
    pub fn brightness_increment(&self) -> f64 {
        parse_increment(self.brightness_increment.as_deref())
    }

    /// Effective contrast step.
    pub fn contrast_increment(&self) -> f64 {
        parse_increment(self.contrast_increment.as_deref())
    }
}

fn parse_increment(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_INCREMENT)
}
