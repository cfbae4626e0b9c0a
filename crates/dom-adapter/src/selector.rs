//! Parser for the selector subset the bridge emits and consumes.
//!
//! Supported: `tag`, `#id`, `.class` compounds, `[attr="value"]`,
//! `:nth-child(n)`, and compounds thereof. Combinators and other
//! pseudo-classes are rejected: the bridge never synthesizes them, and a
//! query using them surfaces as an unsupported-selector fault that the
//! agent catches and logs.

use crate::errors::DomError;

/// One parsed compound selector. All present parts must match the same
/// element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub nth_child: Option<usize>,
}

pub fn parse(selector: &str) -> Result<CompoundSelector, DomError> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Err(DomError::malformed(selector, "empty selector"));
    }
    if trimmed.chars().any(char::is_whitespace) || trimmed.contains(['>', '+', '~', ',']) {
        return Err(DomError::UnsupportedSelector(selector.to_string()));
    }

    let mut parsed = CompoundSelector::default();
    let mut rest = trimmed;

    let tag_end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(rest.len());
    if tag_end > 0 {
        parsed.tag = Some(rest[..tag_end].to_ascii_lowercase());
        rest = &rest[tag_end..];
    }

    while !rest.is_empty() {
        match rest.as_bytes()[0] {
            b'#' => {
                let (name, tail) = take_name(&rest[1..]);
                if name.is_empty() {
                    return Err(DomError::malformed(selector, "empty id"));
                }
                parsed.id = Some(name.to_string());
                rest = tail;
            }
            b'.' => {
                let (name, tail) = take_name(&rest[1..]);
                if name.is_empty() {
                    return Err(DomError::malformed(selector, "empty class"));
                }
                parsed.classes.push(name.to_string());
                rest = tail;
            }
            b'[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| DomError::malformed(selector, "unclosed attribute"))?;
                let inner = &rest[1..close];
                parsed.attrs.push(parse_attr(selector, inner)?);
                rest = &rest[close + 1..];
            }
            b':' => {
                let tail = rest[1..]
                    .strip_prefix("nth-child(")
                    .ok_or_else(|| DomError::UnsupportedSelector(selector.to_string()))?;
                let close = tail
                    .find(')')
                    .ok_or_else(|| DomError::malformed(selector, "unclosed nth-child"))?;
                let position: usize = tail[..close]
                    .parse()
                    .map_err(|_| DomError::malformed(selector, "nth-child expects an index"))?;
                if position == 0 {
                    return Err(DomError::malformed(selector, "nth-child is 1-based"));
                }
                parsed.nth_child = Some(position);
                rest = &tail[close + 1..];
            }
            _ => return Err(DomError::malformed(selector, "unexpected token")),
        }
    }

    Ok(parsed)
}

/// Attribute selectors are equality-only: `attr="value"`.
fn parse_attr(selector: &str, inner: &str) -> Result<(String, String), DomError> {
    let eq = inner
        .find('=')
        .ok_or_else(|| DomError::UnsupportedSelector(selector.to_string()))?;
    let name = &inner[..eq];
    let value = &inner[eq + 1..];
    if name.is_empty() {
        return Err(DomError::malformed(selector, "empty attribute name"));
    }
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or_else(|| DomError::malformed(selector, "attribute value must be double-quoted"))?;
    Ok((name.to_string(), value.to_string()))
}

fn take_name(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(input.len());
    input.split_at(end)
}
