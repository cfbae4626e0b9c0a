//! Declarative page fixtures.
//!
//! A fixture captures the slice of a rendered page the bridge cares
//! about: the element tree with attributes, resolved styles and
//! document-space layout boxes. The CLI harness and the test suites load
//! these instead of driving a real browser.

use std::collections::BTreeMap;

use editbridge_core_types::{Rect, ScrollOffset, Viewport};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub scroll: ScrollOffset,
    /// Content placed under `<body>`. The `html` and `body` elements
    /// themselves are implicit and sized to cover the page.
    #[serde(default)]
    pub body: Vec<FixtureNode>,
}

/// One element in the fixture tree. `rect` is document-space; elements
/// without a rect still resolve by selector but never win hit tests.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FixtureNode {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Resolved styles, as computed-style strings (`"rgb(17, 24, 39)"`,
    /// `"14px"`). Unlisted properties fall back to platform initials.
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<FixtureNode>,
}

impl FixtureNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_rect(mut self, top: f64, left: f64, width: f64, height: f64) -> Self {
        self.rect = Some(Rect::new(top, left, width, height));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: FixtureNode) -> Self {
        self.children.push(child);
        self
    }
}
