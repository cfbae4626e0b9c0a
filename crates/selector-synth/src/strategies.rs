//! The synthesis strategy chain.

use dom_adapter::{DomPort, NodeRef};
use tracing::{debug, warn};

use crate::errors::SynthError;
use crate::types::SynthStrategy;

/// Identity attributes probed by the first strategy, in priority order.
/// `id` renders as a fragment selector, the rest as attribute equality.
pub const DEFAULT_IDENTITY_ATTRIBUTES: [&str; 4] = ["data-testid", "data-id", "data-component", "id"];

/// Derive a selector for `node`, or `None` when the element cannot be
/// identified.
///
/// Deterministic over the current DOM state. Faults anywhere in the chain
/// are logged and collapse to `None`, so one odd element never breaks the
/// caller; callers must treat `None` as "could not identify" and report
/// it upstream rather than retry.
pub fn synthesize<D>(dom: &D, node: NodeRef, identity_attrs: &[String]) -> Option<String>
where
    D: DomPort + ?Sized,
{
    match run_chain(dom, node, identity_attrs) {
        Ok(selector) => selector,
        Err(err) => {
            warn!("selector synthesis failed for {:?}: {}", node, err);
            None
        }
    }
}

fn run_chain<D>(
    dom: &D,
    node: NodeRef,
    identity_attrs: &[String],
) -> Result<Option<String>, SynthError>
where
    D: DomPort + ?Sized,
{
    for strategy in SynthStrategy::priority_chain() {
        let candidate = match strategy {
            SynthStrategy::IdentityAttr => identity_attr(dom, node, identity_attrs)?,
            SynthStrategy::UniqueClass => unique_class(dom, node)?,
            SynthStrategy::NthChild => nth_child(dom, node)?,
            SynthStrategy::BareTag => bare_tag(dom, node)?,
        };
        if let Some(selector) = candidate {
            debug!("synthesized '{}' via {}", selector, strategy.name());
            return Ok(Some(selector));
        }
    }
    Ok(None)
}

/// First present identity attribute with a non-empty value wins.
fn identity_attr<D>(
    dom: &D,
    node: NodeRef,
    identity_attrs: &[String],
) -> Result<Option<String>, SynthError>
where
    D: DomPort + ?Sized,
{
    for attr in identity_attrs {
        let Some(value) = dom.attribute(node, attr)? else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let selector = if attr.as_str() == "id" {
            format!("#{value}")
        } else {
            format!("[{attr}=\"{value}\"]")
        };
        return Ok(Some(selector));
    }
    Ok(None)
}

/// Compound selector over every class token, accepted only when it
/// matches exactly one element: an element sharing classes with siblings
/// must not produce an ambiguous selector.
fn unique_class<D>(dom: &D, node: NodeRef) -> Result<Option<String>, SynthError>
where
    D: DomPort + ?Sized,
{
    let Some(class_attr) = dom.attribute(node, "class")? else {
        return Ok(None);
    };
    let selector: String = class_attr
        .split_whitespace()
        .map(|token| format!(".{token}"))
        .collect();
    if selector.is_empty() {
        return Ok(None);
    }
    let matches = dom.query_selector_all(&selector)?;
    if matches.len() == 1 {
        Ok(Some(selector))
    } else {
        Ok(None)
    }
}

/// 1-based position among the parent's element children. Only locally
/// unique: re-running the query under a repeating parent structure may
/// not single the element out globally. Accepted limitation.
fn nth_child<D>(dom: &D, node: NodeRef) -> Result<Option<String>, SynthError>
where
    D: DomPort + ?Sized,
{
    let Some(parent) = dom.parent_element(node)? else {
        return Ok(None);
    };
    let children = dom.element_children(parent)?;
    let position = children
        .iter()
        .position(|child| *child == node)
        .ok_or_else(|| SynthError::StrategyFailed {
            strategy: SynthStrategy::NthChild.name(),
            reason: "node missing from its parent's children".into(),
        })?;
    let tag = dom.tag_name(node)?.to_ascii_lowercase();
    Ok(Some(format!("{tag}:nth-child({})", position + 1)))
}

fn bare_tag<D>(dom: &D, node: NodeRef) -> Result<Option<String>, SynthError>
where
    D: DomPort + ?Sized,
{
    Ok(Some(dom.tag_name(node)?.to_ascii_lowercase()))
}
