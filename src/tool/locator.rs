//! External binary discovery.
//!
//! Resolution order: explicit `--tool` flag (or `DCTL_TOOL`), the config
//! file, well-known install locations, then a `$PATH` search. Failing all of
//! those is an explicit error rather than a broken invocation later.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Settings;
use crate::error::{DctlError, Result};

/// Well-known install locations checked before searching `$PATH`.
pub const DEFAULT_TOOL_PATHS: &[&str] =
    &["/Applications/BetterDisplay.app/Contents/MacOS/BetterDisplay"];

/// Binary names looked up on `$PATH`.
pub const TOOL_NAMES: &[&str] = &["betterdisplaycli", "betterdisplay", "BetterDisplay"];

/// Locate the external display tool.
///
/// `explicit` wins over everything; a missing explicit path is an error
/// instead of a silent fallback.
pub fn locate(explicit: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return existing(path);
    }

    if let Some(path) = settings.tool.as_deref() {
        return existing(path);
    }

    for candidate in DEFAULT_TOOL_PATHS {
        let path = Path::new(candidate);
        if path.is_file() {
            debug!(path = %path.display(), "Found tool at well-known location");
            return Ok(path.to_path_buf());
        }
    }

    if let Some(path) = search_path() {
        debug!(path = %path.display(), "Found tool on PATH");
        return Ok(path);
    }

    Err(DctlError::ToolNotFound {
        searched: format!(
            "{}, and {} on $PATH",
            DEFAULT_TOOL_PATHS.join(", "),
            TOOL_NAMES.join("/")
        ),
    })
}

fn existing(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(DctlError::ToolNotFound {
            searched: path.display().to_string(),
        })
    }
}

fn search_path() -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        for name in TOOL_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}
