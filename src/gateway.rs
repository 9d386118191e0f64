//! Command gateway over the external display tool.
//!
//! Builds one argument list per operation, runs it through a [`Tool`], and
//! shapes the tool's stdout into what callers need: trimmed text for
//! toggles and setters, the raw blob for the mode list, parsed floats for
//! brightness and contrast. Failures are logged with the display identifier
//! and attempted feature, then returned unchanged; nothing is retried.

use tracing::{debug, error};

use crate::error::{DctlError, Result};
use crate::tool::{Feature, Tool};

/// Valid brightness values accepted by the tool.
pub const BRIGHTNESS_MIN: f64 = 0.0;
pub const BRIGHTNESS_MAX: f64 = 1.0;

/// Valid contrast values accepted by the tool; the upper bound is 0.9, not 1.
pub const CONTRAST_MIN: f64 = -0.9;
pub const CONTRAST_MAX: f64 = 0.9;

/// Result of a read-modify-write brightness/contrast step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    /// Value reported by the tool before the step.
    pub previous: f64,
    /// Clamped value actually requested.
    pub applied: f64,
}

/// Typed operations over a display tool.
pub struct Gateway<T> {
    tool: T,
}

impl<T: Tool> Gateway<T> {
    pub const fn new(tool: T) -> Self {
        Self { tool }
    }

    /// The underlying tool, for callers that need direct access in tests.
    pub const fn tool(&self) -> &T {
        &self.tool
    }

    // === Discovery ===

    /// Raw display discovery output: one JSON object per display,
    /// comma-separated.
    pub async fn identifiers(&self) -> Result<String> {
        let args = vec!["get".to_string(), "-identifiers".to_string()];
        match self.tool.invoke(&args).await {
            Ok(out) => Ok(out),
            Err(e) => {
                error!(error = %e, "Display discovery failed");
                Err(e)
            }
        }
    }

    // === Feature toggles ===

    /// Toggle a display's connect state. Returns the tool's trimmed reply.
    pub async fn toggle_connected(&self, tag: &str) -> Result<String> {
        self.toggle(tag, Feature::Connected).await
    }

    /// Toggle picture-in-picture. Returns the tool's trimmed reply.
    pub async fn toggle_pip(&self, tag: &str) -> Result<String> {
        self.toggle(tag, Feature::Pip).await
    }

    // === Status ===

    /// Current connect status string ("on" / other), trimmed.
    pub async fn connection_status(&self, tag: &str) -> Result<String> {
        let out = self.get(tag, Feature::Connected).await?;
        Ok(out.trim().to_string())
    }

    // === Resolution modes ===

    /// Raw multi-line mode listing, untrimmed, for the mode parser.
    pub async fn mode_list(&self, tag: &str) -> Result<String> {
        self.get(tag, Feature::DisplayModeList).await
    }

    /// Apply a previously-chosen mode number. Returns the trimmed reply.
    pub async fn set_mode(&self, tag: &str, mode: &str) -> Result<String> {
        let out = self.set(tag, Feature::DisplayModeNumber, mode).await?;
        Ok(out.trim().to_string())
    }

    // === Brightness ===

    /// Current brightness, parsed as a float.
    pub async fn brightness(&self, tag: &str) -> Result<f64> {
        let out = self.get(tag, Feature::Brightness).await?;
        parse_number(Feature::Brightness, &out)
    }

    /// Set brightness, clamped to [0, 1]. Returns the value requested.
    pub async fn set_brightness(&self, tag: &str, value: f64) -> Result<f64> {
        let clamped = value.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX);
        self.set(tag, Feature::Brightness, &format_value(clamped))
            .await?;
        Ok(clamped)
    }

    /// Step brightness by `delta` (positive or negative), clamped.
    pub async fn adjust_brightness(&self, tag: &str, delta: f64) -> Result<Adjustment> {
        let previous = self.brightness(tag).await?;
        let applied = self.set_brightness(tag, previous + delta).await?;
        Ok(Adjustment { previous, applied })
    }

    // === Contrast ===

    /// Current contrast, parsed as a float.
    pub async fn contrast(&self, tag: &str) -> Result<f64> {
        let out = self.get(tag, Feature::Contrast).await?;
        parse_number(Feature::Contrast, &out)
    }

    /// Set contrast, clamped to [-0.9, 0.9]. Returns the value requested.
    pub async fn set_contrast(&self, tag: &str, value: f64) -> Result<f64> {
        let clamped = value.clamp(CONTRAST_MIN, CONTRAST_MAX);
        self.set(tag, Feature::Contrast, &format_value(clamped))
            .await?;
        Ok(clamped)
    }

    /// Step contrast by `delta` (positive or negative), clamped.
    pub async fn adjust_contrast(&self, tag: &str, delta: f64) -> Result<Adjustment> {
        let previous = self.contrast(tag).await?;
        let applied = self.set_contrast(tag, previous + delta).await?;
        Ok(Adjustment { previous, applied })
    }

    // === Internal plumbing ===

    async fn toggle(&self, tag: &str, feature: Feature) -> Result<String> {
        let args = vec![
            "toggle".to_string(),
            format!("-tagID={tag}"),
            format!("-feature={feature}"),
        ];
        let out = self.run(tag, feature, args).await?;
        Ok(out.trim().to_string())
    }

    async fn get(&self, tag: &str, feature: Feature) -> Result<String> {
        let args = vec![
            "get".to_string(),
            format!("-tagID={tag}"),
            format!("-feature={feature}"),
        ];
        self.run(tag, feature, args).await
    }

    async fn set(&self, tag: &str, feature: Feature, value: &str) -> Result<String> {
        let args = vec![
            "set".to_string(),
            format!("-tagID={tag}"),
            format!("-feature={feature}"),
            format!("-value={value}"),
        ];
        self.run(tag, feature, args).await
    }

    async fn run(&self, tag: &str, feature: Feature, args: Vec<String>) -> Result<String> {
        debug!(tag, feature = feature.as_str(), "Running tool command");
        match self.tool.invoke(&args).await {
            Ok(out) => Ok(out),
            Err(e) => {
                error!(tag, feature = feature.as_str(), error = %e, "Tool command failed");
                Err(e)
            }
        }
    }
}

/// Parse a getter's trimmed stdout as a float, failing loudly on garbage.
fn parse_number(feature: Feature, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| DctlError::ValueParse {
        feature: feature.as_str().to_string(),
        raw: trimmed.to_string(),
    })
}

/// Render a value for `-value=`: at most two decimals, no trailing zeros.
fn format_value(value: f64) -> String {
    let rendered = format!("{value:.2}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
