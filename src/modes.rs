//! Parser for the external tool's display mode listing.
//!
//! The tool prints one mode per line, shaped like:
//!
//! ```text
//! 20 - 1280x832 HiDPI 60Hz 10bpc Native
//! 21 - 3440x1440 50Hz 10bpc Default Current
//! ```
//!
//! Lines that do not fit the shape are dropped rather than failing the whole
//! parse; the caller gets whatever valid lines exist, possibly none.

use serde::Serialize;

/// One selectable display mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeOption {
    /// String-encoded mode number, passed back verbatim to `set`.
    pub value: String,
    /// Composed label, e.g. `3440x1440 | 50Hz | 10bpc | Default`.
    pub title: String,
    /// Mode the tool flags as risking display corruption.
    #[serde(rename = "unsafe")]
    pub is_unsafe: bool,
    /// Mode currently applied to the display.
    #[serde(rename = "current")]
    pub is_current: bool,
}

impl ModeOption {
    /// Listing marker: filled for the current mode, hollow otherwise.
    pub const fn marker(&self) -> &'static str {
        if self.is_current { "●" } else { "○" }
    }

    /// The resolution segment of the label (e.g. `3440x1440`).
    pub fn resolution(&self) -> &str {
        self.title.split(" | ").next().unwrap_or_default()
    }
}

/// Parse the tool's multi-line mode listing into options, in emitted order.
pub fn parse_mode_list(output: &str) -> Vec<ModeOption> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ModeOption> {
    if line.trim().is_empty() {
        return None;
    }

    let (index, details) = line.split_once(" - ")?;
    let tokens: Vec<&str> = details.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }

    // First token is always the resolution; "HiDPI" directly after it shifts
    // the refresh-rate/color-depth cursor by one.
    let resolution = tokens[0];
    let has_hidpi = tokens.get(1) == Some(&"HiDPI");
    let cursor = if has_hidpi { 2 } else { 1 };

    let refresh_rate = tokens.get(cursor).copied().unwrap_or_default();
    let color_depth = tokens.get(cursor + 1).copied().unwrap_or_default();

    // Flag words may appear in any order after the fixed columns; the label
    // always renders them in a fixed order.
    let has_default = tokens.contains(&"Default");
    let has_native = tokens.contains(&"Native");
    let is_unsafe = tokens.contains(&"Unsafe");
    let is_current = tokens.contains(&"Current");

    let mut parts = vec![resolution];
    if has_hidpi {
        parts.push("HiDPI");
    }
    parts.push(refresh_rate);
    parts.push(color_depth);
    if has_default {
        parts.push("Default");
    }
    if has_native {
        parts.push("Native");
    }

    Some(ModeOption {
        value: index.trim().to_string(),
        title: parts.join(" | "),
        is_unsafe,
        is_current,
    })
}

/// Resolution of the currently applied mode, if the listing marks one.
pub fn current_resolution(options: &[ModeOption]) -> Option<&str> {
    options
        .iter()
        .find(|o| o.is_current)
        .map(ModeOption::resolution)
}
