//! Cross-context message protocol.
//!
//! The bridge is broadcast-style: messages carry no sender identity and no
//! correlation id. Callers that need to pair a `RequestInfo` with the
//! matching `ElementInfo` must serialize their own requests or wrap the
//! protocol in an envelope of their own; see DESIGN.md.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Messages accepted by the bridge agent.
///
/// Unknown `type` tags and payloads missing expected fields are dropped at
/// the parse boundary, not treated as errors; the protocol has to coexist
/// with future extensions from a parent the agent does not control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    #[serde(rename = "VISUAL_EDIT_HIGHLIGHT")]
    Highlight { selector: String },
    #[serde(rename = "VISUAL_EDIT_CLEAR_HIGHLIGHT")]
    ClearHighlight,
    #[serde(rename = "VISUAL_EDIT_REQUEST_INFO")]
    RequestInfo { selector: String },
    #[serde(rename = "VISUAL_EDIT_DETECT_ELEMENT")]
    DetectElement { x: f64, y: f64, action: String },
}

/// Messages the bridge posts back to the requesting context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    #[serde(rename = "ELEMENT_INFO")]
    ElementInfo { data: ElementDescriptor },
    #[serde(rename = "ELEMENT_HOVERED")]
    ElementHovered { selector: String },
    #[serde(rename = "ELEMENT_CLICKED")]
    ElementClicked { selector: String },
    #[serde(rename = "NO_ELEMENT_DETECTED")]
    NoElementDetected { action: String },
}

/// Normalized snapshot of an element's rendered state, produced fresh on
/// every request and never cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Echo of the selector the request carried.
    pub selector: String,
    /// Uppercase tag name, as the platform reports it.
    pub tag_name: String,
    /// Class attribute literal; empty string when the attribute is absent.
    pub class_name: String,
    /// Trimmed concatenated text content.
    pub text_content: String,
    pub computed_styles: ComputedStyleSubset,
    /// Viewport-relative bounding box.
    pub bounding_rect: Rect,
    /// Source provenance from the build's reserved data attributes.
    /// `null` on the wire when the element was never annotated.
    pub source_file: Option<String>,
    pub source_line: Option<String>,
}

/// Fixed allow-list of computed style properties captured per descriptor.
/// Values are the platform's stringified output, unparsed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyleSubset {
    pub color: String,
    pub background_color: String,
    pub font_size: String,
    pub padding: String,
    pub margin: String,
    pub width: String,
    pub height: String,
}
