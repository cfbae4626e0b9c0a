//! Selector synthesis - derive a stable, re-resolvable CSS selector for a
//! concrete element.
//!
//! Four strategies in strict priority order, first success wins:
//! 1. Identity attributes (test ids, component markers, the element id)
//! 2. Class compound, accepted only when unique document-wide
//! 3. `tag:nth-child(n)` structural position
//! 4. Bare lowercase tag name (detached roots)

pub mod errors;
pub mod strategies;
pub mod types;

pub use errors::SynthError;
pub use strategies::{synthesize, DEFAULT_IDENTITY_ATTRIBUTES};
pub use types::SynthStrategy;
