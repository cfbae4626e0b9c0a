use thiserror::Error;

use crate::port::NodeRef;

/// DOM boundary failures.
///
/// The bridge treats every variant as a transient fault: caught at the
/// operation boundary, logged, and surfaced as the operation's "nothing
/// found" result rather than propagated.
#[derive(Debug, Error, Clone)]
pub enum DomError {
    /// Selector uses syntax outside the supported subset.
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),

    /// Selector is inside the subset but does not parse.
    #[error("malformed selector '{selector}': {reason}")]
    MalformedSelector { selector: String, reason: String },

    /// Node handle no longer resolves.
    #[error("stale node handle: {0:?}")]
    StaleNode(NodeRef),

    /// Page fixture could not be interpreted.
    #[error("invalid page fixture: {0}")]
    Fixture(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomError {
    pub fn fixture(msg: impl Into<String>) -> Self {
        Self::Fixture(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn malformed(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}
