//! The singleton highlight overlay.

use dom_adapter::{DomError, DomPort, NodeRef};
use editbridge_core_types::css_px;
use tracing::{debug, warn};

use crate::config::OverlayStyle;

/// Owns the single overlay node: created lazily on the first highlight,
/// hidden (never removed) on clear so repeated highlight cycles do not
/// pay node re-creation.
#[derive(Debug, Default)]
pub struct OverlayManager {
    node: Option<NodeRef>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self { node: None }
    }

    /// The overlay node, once a highlight has created it.
    pub fn node(&self) -> Option<NodeRef> {
        self.node
    }

    /// Position, size and show the overlay over the first element
    /// matching `selector`. No match is a silent no-op: the editor probes
    /// speculative selectors on every pointer move. Geometry is
    /// recomputed from scratch each call, so a moving target never
    /// accumulates drift.
    pub fn highlight<D>(&mut self, dom: &mut D, selector: &str, style: &OverlayStyle)
    where
        D: DomPort + ?Sized,
    {
        if let Err(err) = self.try_highlight(dom, selector, style) {
            warn!("highlight '{}' failed: {}", selector, err);
        }
    }

    fn try_highlight<D>(
        &mut self,
        dom: &mut D,
        selector: &str,
        style: &OverlayStyle,
    ) -> Result<(), DomError>
    where
        D: DomPort + ?Sized,
    {
        let Some(element) = dom.query_selector(selector)? else {
            debug!("highlight target '{}' not found", selector);
            return Ok(());
        };
        let rect = dom.bounding_rect(element)?;
        let scroll = dom.scroll_offset()?;
        let overlay = self.ensure(dom, style)?;
        dom.set_inline_style(overlay, "top", &css_px(rect.top + scroll.y))?;
        dom.set_inline_style(overlay, "left", &css_px(rect.left + scroll.x))?;
        dom.set_inline_style(overlay, "width", &css_px(rect.width))?;
        dom.set_inline_style(overlay, "height", &css_px(rect.height))?;
        dom.set_inline_style(overlay, "display", "block")?;
        Ok(())
    }

    /// Hide the overlay. No-op when it was never created.
    pub fn clear<D>(&mut self, dom: &mut D)
    where
        D: DomPort + ?Sized,
    {
        let Some(overlay) = self.node else {
            return;
        };
        if let Err(err) = dom.set_inline_style(overlay, "display", "none") {
            warn!("clear highlight failed: {}", err);
        }
    }

    /// Idempotent lazy creation of the decorative overlay node.
    fn ensure<D>(&mut self, dom: &mut D, style: &OverlayStyle) -> Result<NodeRef, DomError>
    where
        D: DomPort + ?Sized,
    {
        if let Some(node) = self.node {
            return Ok(node);
        }
        let node = dom.create_element("div")?;
        dom.set_inline_style(node, "position", "fixed")?;
        dom.set_inline_style(node, "pointer-events", "none")?;
        dom.set_inline_style(node, "border", &style.border)?;
        dom.set_inline_style(node, "background", &style.background)?;
        dom.set_inline_style(node, "z-index", &style.z_index.to_string())?;
        dom.set_inline_style(node, "transition", &style.transition)?;
        dom.append_to_body(node)?;
        self.node = Some(node);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_adapter::{FixtureNode, HeadlessDom, PageFixture};
    use editbridge_core_types::ScrollOffset;

    fn page() -> HeadlessDom {
        HeadlessDom::from_fixture(PageFixture {
            body: vec![FixtureNode::new("section")
                .with_attr("id", "hero")
                .with_rect(120.0, 40.0, 600.0, 200.0)],
            ..PageFixture::default()
        })
        .unwrap()
    }

    fn style_of(dom: &HeadlessDom, node: NodeRef, property: &str) -> String {
        dom.inline_style(node, property).unwrap().unwrap()
    }

    #[test]
    fn highlight_creates_and_positions_the_overlay() {
        let mut dom = page();
        let mut overlay = OverlayManager::new();
        overlay.highlight(&mut dom, "#hero", &OverlayStyle::default());

        let node = overlay.node().expect("overlay created");
        assert_eq!(style_of(&dom, node, "top"), "120px");
        assert_eq!(style_of(&dom, node, "left"), "40px");
        assert_eq!(style_of(&dom, node, "width"), "600px");
        assert_eq!(style_of(&dom, node, "height"), "200px");
        assert_eq!(style_of(&dom, node, "display"), "block");
        assert_eq!(style_of(&dom, node, "pointer-events"), "none");
        assert_eq!(style_of(&dom, node, "border"), "2px solid #3b82f6");
    }

    #[test]
    fn repeated_highlights_reuse_one_node_and_recompute_geometry() {
        let mut dom = page();
        let mut overlay = OverlayManager::new();
        overlay.highlight(&mut dom, "#hero", &OverlayStyle::default());
        let first = overlay.node().unwrap();

        // Scroll: viewport rect changes but document coordinates must not.
        dom.set_scroll(ScrollOffset { x: 10.0, y: 80.0 });
        overlay.highlight(&mut dom, "#hero", &OverlayStyle::default());
        assert_eq!(overlay.node(), Some(first));
        assert_eq!(style_of(&dom, first, "top"), "120px");
        assert_eq!(style_of(&dom, first, "left"), "40px");
    }

    #[test]
    fn unmatched_selector_is_a_silent_no_op() {
        let mut dom = page();
        let mut overlay = OverlayManager::new();
        overlay.highlight(&mut dom, "#missing", &OverlayStyle::default());
        assert!(overlay.node().is_none());
    }

    #[test]
    fn malformed_selector_is_caught() {
        let mut dom = page();
        let mut overlay = OverlayManager::new();
        overlay.highlight(&mut dom, "div > span", &OverlayStyle::default());
        assert!(overlay.node().is_none());
    }

    #[test]
    fn clear_before_any_highlight_is_a_no_op() {
        let mut dom = page();
        let mut overlay = OverlayManager::new();
        overlay.clear(&mut dom);
        assert!(overlay.node().is_none());
    }

    #[test]
    fn clear_hides_but_keeps_the_node() {
        let mut dom = page();
        let mut overlay = OverlayManager::new();
        overlay.highlight(&mut dom, "#hero", &OverlayStyle::default());
        let node = overlay.node().unwrap();
        overlay.clear(&mut dom);
        assert_eq!(overlay.node(), Some(node));
        assert_eq!(style_of(&dom, node, "display"), "none");

        // Highlight after clear shows the same node again.
        overlay.highlight(&mut dom, "#hero", &OverlayStyle::default());
        assert_eq!(style_of(&dom, node, "display"), "block");
    }
}
