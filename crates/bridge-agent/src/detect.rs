//! Point resolution - viewport coordinates to the topmost meaningful
//! element.

use dom_adapter::{DomPort, NodeRef};
use tracing::warn;

/// Topmost element at `(x, y)`, or `None` when the hit test lands on
/// nothing, on an excluded root container, or faults. Root containers
/// carry no semantic meaning to an editor and are reported as "nothing
/// actionable here". Pure query; safe on every pointer move.
pub fn resolve_at<D>(dom: &D, x: f64, y: f64, excluded_tags: &[String]) -> Option<NodeRef>
where
    D: DomPort + ?Sized,
{
    let element = match dom.element_from_point(x, y) {
        Ok(hit) => hit?,
        Err(err) => {
            warn!("hit test at ({}, {}) failed: {}", x, y, err);
            return None;
        }
    };
    let tag = match dom.tag_name(element) {
        Ok(tag) => tag,
        Err(err) => {
            warn!("tag lookup for {:?} failed: {}", element, err);
            return None;
        }
    };
    if excluded_tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
        return None;
    }
    Some(element)
}
