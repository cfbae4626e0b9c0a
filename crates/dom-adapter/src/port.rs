use editbridge_core_types::{Rect, ScrollOffset};

use crate::errors::DomError;

/// Opaque handle to an element node. Handles stay valid for the life of
/// the page; resolving one that never existed yields
/// [`DomError::StaleNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef(pub u64);

/// Synchronous view over the live document.
///
/// Every method is a plain DOM read except the overlay mutators at the
/// bottom. Calls never block or suspend; the async boundary of the bridge
/// sits at the message channel, not here.
pub trait DomPort: Send + Sync {
    /// First element matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Result<Option<NodeRef>, DomError>;

    /// All elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeRef>, DomError>;

    /// Topmost rendered element at viewport coordinates. Content with
    /// `pointer-events: none` (the overlay included) never wins a hit
    /// test; coordinates outside the viewport resolve to nothing.
    fn element_from_point(&self, x: f64, y: f64) -> Result<Option<NodeRef>, DomError>;

    /// Uppercase tag name, as the platform reports it.
    fn tag_name(&self, node: NodeRef) -> Result<String, DomError>;

    fn attribute(&self, node: NodeRef, name: &str) -> Result<Option<String>, DomError>;

    /// Concatenated descendant text, untrimmed.
    fn text_content(&self, node: NodeRef) -> Result<String, DomError>;

    /// Resolved value for one CSS property, stringified the way the
    /// platform would return it.
    fn computed_style(&self, node: NodeRef, property: &str) -> Result<String, DomError>;

    /// Viewport-relative bounding box. Non-rendered elements report a
    /// zero box.
    fn bounding_rect(&self, node: NodeRef) -> Result<Rect, DomError>;

    fn parent_element(&self, node: NodeRef) -> Result<Option<NodeRef>, DomError>;

    fn element_children(&self, node: NodeRef) -> Result<Vec<NodeRef>, DomError>;

    fn scroll_offset(&self) -> Result<ScrollOffset, DomError>;

    // Overlay node management: the only writes the bridge performs.

    fn create_element(&mut self, tag: &str) -> Result<NodeRef, DomError>;

    fn append_to_body(&mut self, node: NodeRef) -> Result<(), DomError>;

    fn set_inline_style(
        &mut self,
        node: NodeRef,
        property: &str,
        value: &str,
    ) -> Result<(), DomError>;

    /// Read back one inline style property, for overlay introspection.
    fn inline_style(&self, node: NodeRef, property: &str) -> Result<Option<String>, DomError>;
}
