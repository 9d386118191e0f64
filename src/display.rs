//! Display discovery and the per-invocation status snapshot.
//!
//! Discovery asks the tool for identifiers; the tool answers with one JSON
//! object per display, comma-separated. The snapshot fans out one status
//! query per display, then one mode-list query per display that is on, and
//! joins the results into maps keyed by tag. A failed query leaves that
//! display's slot empty without aborting the batch.

use std::collections::HashMap;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DctlError, Result};
use crate::gateway::Gateway;
use crate::modes;
use crate::tool::Tool;

/// A connected display device, as reported by the external tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Display {
    /// Opaque identifier the tool uses to address this display.
    #[serde(rename = "tagID")]
    pub tag_id: String,
    /// Human-readable display name.
    pub name: String,
    /// Physical display or virtual screen.
    #[serde(rename = "deviceType")]
    pub category: DeviceCategory,
}

/// Device category reported by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceCategory {
    Display,
    VirtualScreen,
    /// Category this version does not know about.
    #[serde(other)]
    Unknown,
}

impl DeviceCategory {
    /// Section heading used by the list view.
    pub const fn section_title(self) -> &'static str {
        match self {
            Self::Display => "Displays",
            Self::VirtualScreen => "Virtual Screens",
            Self::Unknown => "Other Devices",
        }
    }
}

/// Query the tool for all connected displays.
pub async fn discover<T: Tool>(gateway: &Gateway<T>) -> Result<Vec<Display>> {
    let raw = gateway.identifiers().await?;
    parse_display_list(&raw)
}

/// Parse the discovery output: comma-separated JSON objects, possibly empty.
pub fn parse_display_list(raw: &str) -> Result<Vec<Display>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let wrapped = format!("[{trimmed}]");
    serde_json::from_str(&wrapped).map_err(|e| DctlError::DiscoveryParse(e.to_string()))
}

/// Transient per-invocation view of display state, rebuilt on every load.
#[derive(Debug, Default)]
pub struct Overview {
    statuses: HashMap<String, String>,
    resolutions: HashMap<String, String>,
}

impl Overview {
    /// Fan out status and resolution queries for `displays` and join the
    /// results. Individual failures are logged and tolerated.
    pub async fn load<T: Tool>(gateway: &Gateway<T>, displays: &[Display]) -> Self {
        let status_results = join_all(displays.iter().map(|d| async move {
            let status = gateway.connection_status(&d.tag_id).await;
            (d.tag_id.clone(), status)
        }))
        .await;

        let mut statuses = HashMap::new();
        for (tag, status) in status_results {
            match status {
                Ok(s) => {
                    statuses.insert(tag, s);
                }
                Err(e) => warn!(tag, error = %e, "Status query failed"),
            }
        }

        // Resolutions only make sense for displays that are on; the current
        // mode comes out of the same listing the modes command parses.
        let active: Vec<&Display> = displays
            .iter()
            .filter(|d| {
                statuses
                    .get(&d.tag_id)
                    .is_some_and(|s| s.eq_ignore_ascii_case("on"))
            })
            .collect();

        let resolution_results = join_all(active.iter().map(|d| async move {
            let listing = gateway.mode_list(&d.tag_id).await;
            (d.tag_id.clone(), listing)
        }))
        .await;

        let mut resolutions = HashMap::new();
        for (tag, listing) in resolution_results {
            match listing {
                Ok(raw) => {
                    let options = modes::parse_mode_list(&raw);
                    if let Some(res) = modes::current_resolution(&options) {
                        resolutions.insert(tag, res.to_string());
                    }
                }
                Err(e) => warn!(tag, error = %e, "Mode list query failed"),
            }
        }

        debug!(
            statuses = statuses.len(),
            resolutions = resolutions.len(),
            "Overview loaded"
        );
        Self {
            statuses,
            resolutions,
        }
    }

    /// Status string for a display, if its query succeeded.
    pub fn status(&self, tag: &str) -> Option<&str> {
        self.statuses.get(tag).map(String::as_str)
    }

    /// Current resolution for a display, if known.
    pub fn resolution(&self, tag: &str) -> Option<&str> {
        self.resolutions.get(tag).map(String::as_str)
    }

    /// Whether the display reported itself as on.
    pub fn is_on(&self, tag: &str) -> bool {
        self.status(tag).is_some_and(|s| s.eq_ignore_ascii_case("on"))
    }
}
