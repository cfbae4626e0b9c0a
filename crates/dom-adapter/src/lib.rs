//! DOM access boundary for the visual edit bridge.
//!
//! The bridge reads the live document (queries, geometry, computed styles)
//! and performs exactly one kind of write: managing its highlight overlay
//! node. Both sides go through [`DomPort`] so the agent can run against a
//! real page embedding or against [`HeadlessDom`], the in-memory
//! implementation driven by declarative page fixtures.

pub mod errors;
pub mod fixture;
pub mod headless;
pub mod port;
pub mod selector;

pub use errors::DomError;
pub use fixture::{FixtureNode, PageFixture};
pub use headless::HeadlessDom;
pub use port::{DomPort, NodeRef};
