//! EditBridge - a visual page-editing bridge.
//!
//! The in-page agent lets a controlling editor context inspect, highlight
//! and identify DOM elements over an asynchronous cross-context message
//! protocol. This crate is the workspace facade: it re-exports the bridge
//! crates for embedders and hosts the fixture-driven harness behind the
//! `editbridge` binary.

pub mod harness;

pub use bridge_agent::{BridgeAgent, BridgeConfig, OverlayStyle};
pub use dom_adapter::{DomPort, HeadlessDom, NodeRef, PageFixture};
pub use editbridge_core_types::{ElementDescriptor, InboundMessage, OutboundMessage};
pub use editbridge_event_bus::{InMemoryBus, MessageBus};
pub use selector_synth::synthesize;
