//! Descriptor extraction - a normalized snapshot of a selector's element.

use dom_adapter::{DomError, DomPort};
use editbridge_core_types::{ComputedStyleSubset, ElementDescriptor};
use tracing::warn;

use crate::config::BridgeConfig;

/// Resolve `selector` to its first match and snapshot the element's
/// rendered state. A stale selector (zero matches) logs a warning and
/// yields `None`; so does any DOM fault. Produced fresh on every call,
/// never cached.
pub fn describe<D>(dom: &D, selector: &str, config: &BridgeConfig) -> Option<ElementDescriptor>
where
    D: DomPort + ?Sized,
{
    match try_describe(dom, selector, config) {
        Ok(Some(descriptor)) => Some(descriptor),
        Ok(None) => {
            warn!("element not found: {}", selector);
            None
        }
        Err(err) => {
            warn!("describe '{}' failed: {}", selector, err);
            None
        }
    }
}

fn try_describe<D>(
    dom: &D,
    selector: &str,
    config: &BridgeConfig,
) -> Result<Option<ElementDescriptor>, DomError>
where
    D: DomPort + ?Sized,
{
    let Some(element) = dom.query_selector(selector)? else {
        return Ok(None);
    };

    let computed_styles = ComputedStyleSubset {
        color: dom.computed_style(element, "color")?,
        background_color: dom.computed_style(element, "background-color")?,
        font_size: dom.computed_style(element, "font-size")?,
        padding: dom.computed_style(element, "padding")?,
        margin: dom.computed_style(element, "margin")?,
        width: dom.computed_style(element, "width")?,
        height: dom.computed_style(element, "height")?,
    };

    Ok(Some(ElementDescriptor {
        selector: selector.to_string(),
        tag_name: dom.tag_name(element)?,
        class_name: dom.attribute(element, "class")?.unwrap_or_default(),
        text_content: dom.text_content(element)?.trim().to_string(),
        computed_styles,
        bounding_rect: dom.bounding_rect(element)?,
        source_file: dom.attribute(element, &config.source_file_attribute)?,
        source_line: dom.attribute(element, &config.source_line_attribute)?,
    }))
}
