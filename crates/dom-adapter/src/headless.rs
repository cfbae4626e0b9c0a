//! In-memory DOM implementation backed by page fixtures.
//!
//! Arena-allocated element tree with enough layout and style state to
//! honor the [`DomPort`] contract: document-order selector queries,
//! z-order hit testing, computed-style reads with platform-initial
//! fallbacks, and the overlay-node mutations.

use std::collections::BTreeMap;

use editbridge_core_types::{css_px, Rect, ScrollOffset, Viewport};
use tracing::debug;

use crate::errors::DomError;
use crate::fixture::{FixtureNode, PageFixture};
use crate::port::{DomPort, NodeRef};
use crate::selector::{self, CompoundSelector};

#[derive(Clone, Debug)]
struct ElementNode {
    parent: Option<usize>,
    children: Vec<usize>,
    /// Lowercase; the port reports the uppercase form.
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    inline: BTreeMap<String, String>,
    /// Document-space layout box.
    rect: Option<Rect>,
    text: Option<String>,
}

impl ElementNode {
    fn new(tag: &str, parent: Option<usize>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            styles: BTreeMap::new(),
            inline: BTreeMap::new(),
            rect: None,
            text: None,
        }
    }
}

pub struct HeadlessDom {
    nodes: Vec<ElementNode>,
    viewport: Viewport,
    scroll: ScrollOffset,
    html: usize,
    body: usize,
}

impl HeadlessDom {
    /// Build a document from a fixture. The implicit `html`/`body` pair is
    /// sized to cover the viewport and every content box.
    pub fn from_fixture(fixture: PageFixture) -> Result<Self, DomError> {
        let mut dom = Self {
            nodes: vec![ElementNode::new("html", None)],
            viewport: fixture.viewport,
            scroll: fixture.scroll,
            html: 0,
            body: 0,
        };
        dom.body = dom.push_node(ElementNode::new("body", Some(dom.html)));

        for child in &fixture.body {
            dom.insert_fixture_node(child, dom.body)?;
        }

        let page_box = dom.page_box();
        dom.nodes[dom.html].rect = Some(page_box);
        dom.nodes[dom.body].rect = Some(page_box);
        debug!("page fixture loaded: {} elements", dom.nodes.len());
        Ok(dom)
    }

    pub fn body(&self) -> NodeRef {
        NodeRef(self.body as u64)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Reposition the page, as a user scroll would.
    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    fn insert_fixture_node(&mut self, node: &FixtureNode, parent: usize) -> Result<(), DomError> {
        if node.tag.trim().is_empty() {
            return Err(DomError::fixture("element with empty tag"));
        }
        let mut element = ElementNode::new(node.tag.trim(), Some(parent));
        element.attrs = node.attrs.clone();
        element.styles = node.styles.clone();
        element.rect = node.rect;
        element.text = node.text.clone();
        let idx = self.push_node(element);
        self.nodes[parent].children.push(idx);
        for child in &node.children {
            self.insert_fixture_node(child, idx)?;
        }
        Ok(())
    }

    fn push_node(&mut self, node: ElementNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn page_box(&self) -> Rect {
        let mut right = self.viewport.width;
        let mut bottom = self.viewport.height;
        for node in &self.nodes {
            if let Some(rect) = node.rect {
                right = right.max(rect.right());
                bottom = bottom.max(rect.bottom());
            }
        }
        Rect::new(0.0, 0.0, right, bottom)
    }

    fn get(&self, node: NodeRef) -> Result<&ElementNode, DomError> {
        self.nodes
            .get(node.0 as usize)
            .ok_or(DomError::StaleNode(node))
    }

    fn get_mut(&mut self, node: NodeRef) -> Result<&mut ElementNode, DomError> {
        self.nodes
            .get_mut(node.0 as usize)
            .ok_or(DomError::StaleNode(node))
    }

    /// Whether a node hangs off the document root. Created-but-unappended
    /// overlay nodes are not attached.
    fn attached(&self, idx: usize) -> bool {
        let mut cur = idx;
        loop {
            if cur == self.html {
                return true;
            }
            match self.nodes[cur].parent {
                Some(parent) => cur = parent,
                None => return false,
            }
        }
    }

    /// Inline style wins over the fixture's resolved styles.
    fn effective_style(&self, idx: usize, property: &str) -> Option<&str> {
        let node = &self.nodes[idx];
        node.inline
            .get(property)
            .or_else(|| node.styles.get(property))
            .map(String::as_str)
    }

    fn z_index(&self, idx: usize) -> i32 {
        self.effective_style(idx, "z-index")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Hit-test participation: a `display: none` anywhere up the chain
    /// removes the subtree; `pointer-events` inherits, nearest explicit
    /// value wins.
    fn hit_testable(&self, idx: usize) -> bool {
        let mut cur = Some(idx);
        while let Some(i) = cur {
            if self.effective_style(i, "display") == Some("none") {
                return false;
            }
            cur = self.nodes[i].parent;
        }
        let mut cur = Some(idx);
        while let Some(i) = cur {
            match self.effective_style(i, "pointer-events") {
                Some("none") => return false,
                Some(_) => return true,
                None => cur = self.nodes[i].parent,
            }
        }
        true
    }

    fn matches(&self, idx: usize, selector: &CompoundSelector) -> bool {
        let node = &self.nodes[idx];
        if let Some(tag) = &selector.tag {
            if node.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &selector.id {
            if node.attrs.get("id") != Some(id) {
                return false;
            }
        }
        if !selector.classes.is_empty() {
            let class_attr = node.attrs.get("class").map(String::as_str).unwrap_or("");
            let tokens: Vec<&str> = class_attr.split_whitespace().collect();
            if !selector.classes.iter().all(|c| tokens.contains(&c.as_str())) {
                return false;
            }
        }
        for (name, value) in &selector.attrs {
            if node.attrs.get(name) != Some(value) {
                return false;
            }
        }
        if let Some(position) = selector.nth_child {
            let actual = match node.parent {
                Some(parent) => {
                    match self.nodes[parent].children.iter().position(|c| *c == idx) {
                        Some(i) => i + 1,
                        None => return false,
                    }
                }
                // The root element counts as its document's first child.
                None => 1,
            };
            if actual != position {
                return false;
            }
        }
        true
    }

    fn query(&self, selector: &str) -> Result<Vec<usize>, DomError> {
        let parsed = selector::parse(selector)?;
        Ok((0..self.nodes.len())
            .filter(|idx| self.attached(*idx) && self.matches(*idx, &parsed))
            .collect())
    }

    fn collect_text(&self, idx: usize, out: &mut String) {
        if let Some(text) = &self.nodes[idx].text {
            out.push_str(text);
        }
        for child in &self.nodes[idx].children {
            self.collect_text(*child, out);
        }
    }
}

impl DomPort for HeadlessDom {
    fn query_selector(&self, selector: &str) -> Result<Option<NodeRef>, DomError> {
        Ok(self.query(selector)?.first().map(|idx| NodeRef(*idx as u64)))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeRef>, DomError> {
        Ok(self
            .query(selector)?
            .into_iter()
            .map(|idx| NodeRef(idx as u64))
            .collect())
    }

    fn element_from_point(&self, x: f64, y: f64) -> Result<Option<NodeRef>, DomError> {
        if x < 0.0 || y < 0.0 || x > self.viewport.width || y > self.viewport.height {
            return Ok(None);
        }
        let doc_x = x + self.scroll.x;
        let doc_y = y + self.scroll.y;
        let hit = (0..self.nodes.len())
            .filter(|idx| self.attached(*idx) && self.hit_testable(*idx))
            .filter(|idx| {
                self.nodes[*idx]
                    .rect
                    .is_some_and(|rect| rect.contains(doc_x, doc_y))
            })
            .max_by_key(|idx| (self.z_index(*idx), *idx));
        Ok(hit.map(|idx| NodeRef(idx as u64)))
    }

    fn tag_name(&self, node: NodeRef) -> Result<String, DomError> {
        Ok(self.get(node)?.tag.to_ascii_uppercase())
    }

    fn attribute(&self, node: NodeRef, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.get(node)?.attrs.get(name).cloned())
    }

    fn text_content(&self, node: NodeRef) -> Result<String, DomError> {
        self.get(node)?;
        let mut out = String::new();
        self.collect_text(node.0 as usize, &mut out);
        Ok(out)
    }

    fn computed_style(&self, node: NodeRef, property: &str) -> Result<String, DomError> {
        let element = self.get(node)?;
        if let Some(value) = self.effective_style(node.0 as usize, property) {
            return Ok(value.to_string());
        }
        let initial = match property {
            "color" => "rgb(0, 0, 0)".to_string(),
            "background-color" => "rgba(0, 0, 0, 0)".to_string(),
            "font-size" => "16px".to_string(),
            "padding" | "margin" => "0px".to_string(),
            "width" => element.rect.map(|r| css_px(r.width)).unwrap_or_else(|| "auto".into()),
            "height" => element.rect.map(|r| css_px(r.height)).unwrap_or_else(|| "auto".into()),
            "display" => "block".to_string(),
            "pointer-events" => "auto".to_string(),
            _ => String::new(),
        };
        Ok(initial)
    }

    fn bounding_rect(&self, node: NodeRef) -> Result<Rect, DomError> {
        let element = self.get(node)?;
        Ok(match element.rect {
            Some(rect) => Rect::new(
                rect.top - self.scroll.y,
                rect.left - self.scroll.x,
                rect.width,
                rect.height,
            ),
            None => Rect::default(),
        })
    }

    fn parent_element(&self, node: NodeRef) -> Result<Option<NodeRef>, DomError> {
        Ok(self.get(node)?.parent.map(|idx| NodeRef(idx as u64)))
    }

    fn element_children(&self, node: NodeRef) -> Result<Vec<NodeRef>, DomError> {
        Ok(self
            .get(node)?
            .children
            .iter()
            .map(|idx| NodeRef(*idx as u64))
            .collect())
    }

    fn scroll_offset(&self) -> Result<ScrollOffset, DomError> {
        Ok(self.scroll)
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeRef, DomError> {
        if tag.trim().is_empty() {
            return Err(DomError::internal("create_element with empty tag"));
        }
        let idx = self.push_node(ElementNode::new(tag.trim(), None));
        Ok(NodeRef(idx as u64))
    }

    fn append_to_body(&mut self, node: NodeRef) -> Result<(), DomError> {
        let idx = node.0 as usize;
        self.get(node)?;
        if self.nodes[idx].parent.is_none() {
            self.nodes[idx].parent = Some(self.body);
            let body = self.body;
            self.nodes[body].children.push(idx);
        }
        Ok(())
    }

    fn set_inline_style(
        &mut self,
        node: NodeRef,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        self.get_mut(node)?
            .inline
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn inline_style(&self, node: NodeRef, property: &str) -> Result<Option<String>, DomError> {
        Ok(self.get(node)?.inline.get(property).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> HeadlessDom {
        let fixture = PageFixture {
            viewport: Viewport {
                width: 1000.0,
                height: 600.0,
            },
            scroll: ScrollOffset::default(),
            body: vec![
                FixtureNode::new("main")
                    .with_attr("class", "layout")
                    .with_rect(0.0, 0.0, 1000.0, 400.0)
                    .with_child(
                        FixtureNode::new("h1")
                            .with_attr("id", "hero")
                            .with_rect(20.0, 40.0, 600.0, 48.0)
                            .with_text("Fresh picks"),
                    )
                    .with_child(
                        FixtureNode::new("button")
                            .with_attr("class", "btn btn-primary")
                            .with_style("color", "rgb(255, 255, 255)")
                            .with_style("z-index", "5")
                            .with_rect(90.0, 40.0, 120.0, 36.0)
                            .with_text("Add to cart"),
                    ),
                FixtureNode::new("ul")
                    .with_rect(420.0, 0.0, 1000.0, 120.0)
                    .with_child(FixtureNode::new("li").with_rect(420.0, 0.0, 250.0, 120.0))
                    .with_child(FixtureNode::new("li").with_rect(420.0, 250.0, 250.0, 120.0))
                    .with_child(FixtureNode::new("li").with_rect(420.0, 500.0, 250.0, 120.0)),
            ],
        };
        HeadlessDom::from_fixture(fixture).unwrap()
    }

    #[test]
    fn queries_run_in_document_order() {
        let dom = sample_page();
        let items = dom.query_selector_all("li").unwrap();
        assert_eq!(items.len(), 3);
        let first = dom.query_selector("li").unwrap().unwrap();
        assert_eq!(first, items[0]);
    }

    #[test]
    fn compound_and_structural_selectors_match() {
        let dom = sample_page();
        assert!(dom.query_selector("#hero").unwrap().is_some());
        assert_eq!(dom.query_selector_all(".btn.btn-primary").unwrap().len(), 1);

        let third = dom.query_selector("li:nth-child(3)").unwrap().unwrap();
        let items = dom.query_selector_all("li").unwrap();
        assert_eq!(third, items[2]);
    }

    #[test]
    fn descendant_combinators_are_rejected() {
        let dom = sample_page();
        assert!(matches!(
            dom.query_selector("main h1"),
            Err(DomError::UnsupportedSelector(_))
        ));
    }

    #[test]
    fn hit_test_prefers_z_index_then_document_order() {
        let dom = sample_page();
        // The button sits inside main's box; its z-index of 5 wins.
        let hit = dom.element_from_point(50.0, 100.0).unwrap().unwrap();
        assert_eq!(dom.tag_name(hit).unwrap(), "BUTTON");
        // Plain content: deepest element in document order wins over its
        // ancestors.
        let hit = dom.element_from_point(60.0, 30.0).unwrap().unwrap();
        assert_eq!(dom.tag_name(hit).unwrap(), "H1");
    }

    #[test]
    fn hit_test_outside_viewport_is_none() {
        let dom = sample_page();
        assert!(dom.element_from_point(-5.0, 10.0).unwrap().is_none());
        assert!(dom.element_from_point(10.0, 4000.0).unwrap().is_none());
    }

    #[test]
    fn background_hits_resolve_to_body() {
        let dom = sample_page();
        let hit = dom.element_from_point(900.0, 580.0).unwrap().unwrap();
        assert_eq!(dom.tag_name(hit).unwrap(), "BODY");
    }

    #[test]
    fn pointer_events_none_is_skipped() {
        let mut dom = sample_page();
        let overlay = dom.create_element("div").unwrap();
        dom.set_inline_style(overlay, "pointer-events", "none").unwrap();
        dom.append_to_body(overlay).unwrap();
        // Give it a box over the whole page; the hit test must ignore it.
        dom.nodes[overlay.0 as usize].rect = Some(Rect::new(0.0, 0.0, 1000.0, 600.0));
        let hit = dom.element_from_point(50.0, 100.0).unwrap().unwrap();
        assert_eq!(dom.tag_name(hit).unwrap(), "BUTTON");
    }

    #[test]
    fn bounding_rect_is_viewport_relative() {
        let mut dom = sample_page();
        let hero = dom.query_selector("#hero").unwrap().unwrap();
        assert_eq!(dom.bounding_rect(hero).unwrap().top, 20.0);
        dom.set_scroll(ScrollOffset { x: 0.0, y: 15.0 });
        assert_eq!(dom.bounding_rect(hero).unwrap().top, 5.0);
    }

    #[test]
    fn computed_style_falls_back_to_initial_values() {
        let dom = sample_page();
        let hero = dom.query_selector("#hero").unwrap().unwrap();
        assert_eq!(dom.computed_style(hero, "color").unwrap(), "rgb(0, 0, 0)");
        assert_eq!(
            dom.computed_style(hero, "background-color").unwrap(),
            "rgba(0, 0, 0, 0)"
        );
        assert_eq!(dom.computed_style(hero, "width").unwrap(), "600px");

        let button = dom.query_selector(".btn.btn-primary").unwrap().unwrap();
        assert_eq!(
            dom.computed_style(button, "color").unwrap(),
            "rgb(255, 255, 255)"
        );
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let dom = sample_page();
        let main = dom.query_selector("main").unwrap().unwrap();
        let text = dom.text_content(main).unwrap();
        assert!(text.contains("Fresh picks"));
        assert!(text.contains("Add to cart"));
    }

    #[test]
    fn created_nodes_stay_detached_until_appended() {
        let mut dom = sample_page();
        let node = dom.create_element("div").unwrap();
        dom.set_inline_style(node, "display", "block").unwrap();
        assert!(dom.query_selector("div").unwrap().is_none());
        dom.append_to_body(node).unwrap();
        assert_eq!(dom.query_selector("div").unwrap(), Some(node));
    }
}
