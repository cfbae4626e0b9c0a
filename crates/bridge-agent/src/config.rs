//! Bridge configuration.
//!
//! Defaults reproduce the stock agent. The identity-attribute convention,
//! the overlay chrome and the root-exclusion list vary per embedding
//! host, so all three are overridable from a YAML view.

use serde::{Deserialize, Serialize};

use selector_synth::DEFAULT_IDENTITY_ATTRIBUTES;

use crate::errors::AgentError;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Identity attributes probed by selector synthesis, in priority
    /// order.
    pub identity_attributes: Vec<String>,

    /// Highlight overlay chrome.
    pub overlay: OverlayStyle,

    /// Document-root and whole-page container tags the point resolver
    /// reports as "nothing actionable".
    pub excluded_root_tags: Vec<String>,

    /// Reserved data attributes carrying source provenance, written by an
    /// external build step and only ever read here.
    pub source_file_attribute: String,
    pub source_line_attribute: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            identity_attributes: DEFAULT_IDENTITY_ATTRIBUTES
                .iter()
                .map(|attr| attr.to_string())
                .collect(),
            overlay: OverlayStyle::default(),
            excluded_root_tags: vec!["html".into(), "body".into()],
            source_file_attribute: "data-source-file".into(),
            source_line_attribute: "data-source-line".into(),
        }
    }
}

impl BridgeConfig {
    /// Parse a YAML config view; absent fields keep their defaults.
    pub fn from_yaml(input: &str) -> Result<Self, AgentError> {
        Ok(serde_yaml::from_str(input)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub border: String,
    pub background: String,
    pub z_index: u32,
    pub transition: String,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            border: "2px solid #3b82f6".into(),
            background: "rgba(59, 130, 246, 0.1)".into(),
            z_index: 999_999,
            transition: "all 0.15s ease".into(),
        }
    }
}
