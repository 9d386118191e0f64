//! External tool abstraction layer.
//!
//! Every operation in this crate is one invocation of a BetterDisplay-style
//! display management binary. This module provides a trait-based abstraction
//! over the real binary and a mock implementation, enabling testability
//! without the tool installed.

mod locator;
pub mod mock;
mod real;

pub use locator::{locate, DEFAULT_TOOL_PATHS, TOOL_NAMES};
pub use real::CliTool;

use std::fmt;

use crate::error::Result;

/// Features addressable through the external tool's `-feature=` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Connect state of a display.
    Connected,
    /// Picture-in-picture toggle.
    Pip,
    /// Multi-line listing of selectable display modes.
    DisplayModeList,
    /// Mode number applied via `set`.
    DisplayModeNumber,
    /// Brightness as a float.
    Brightness,
    /// Contrast as a float.
    Contrast,
}

impl Feature {
    /// The token the external tool expects after `-feature=`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Pip => "pip",
            Self::DisplayModeList => "displayModeList",
            Self::DisplayModeNumber => "displayModeNumber",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-shot invocation of the external display tool.
///
/// Implementations run the tool with the given argument list and return raw
/// stdout on success. Any spawn failure or non-zero exit is an error; exit
/// codes are not interpreted beyond success/failure, and nothing is retried.
#[allow(async_fn_in_trait)]
pub trait Tool {
    /// Run the tool once and return its raw standard output.
    async fn invoke(&self, args: &[String]) -> Result<String>;
}
