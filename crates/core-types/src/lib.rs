//! Shared primitives for the EditBridge workspace.
//!
//! Everything that crosses a crate boundary lives here: the cross-context
//! wire protocol, the element descriptor snapshot and the geometry types
//! used by layout queries.

use thiserror::Error;

pub mod geometry;
pub mod protocol;

pub use geometry::{css_px, Rect, ScrollOffset, Viewport};
pub use protocol::{ComputedStyleSubset, ElementDescriptor, InboundMessage, OutboundMessage};

/// Shared error type for cross-crate plumbing (bus publication and the
/// like). Operation-level failures carry their own error enums.
#[derive(Debug, Error, Clone)]
pub enum BridgeError {
    #[error("{message}")]
    Message { message: String },
}

impl BridgeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}
