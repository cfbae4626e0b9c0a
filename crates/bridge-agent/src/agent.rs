//! The bridge agent: inbound dispatch and the serial handling loop.

use std::sync::Arc;

use dom_adapter::{DomPort, NodeRef};
use editbridge_core_types::{InboundMessage, OutboundMessage};
use editbridge_event_bus::{InMemoryBus, MessageBus};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use selector_synth::synthesize;

use crate::config::BridgeConfig;
use crate::detect;
use crate::inspect;
use crate::overlay::OverlayManager;

/// Action tag the editor sends while tracking pointer movement. Every
/// other action value routes like a click; the string itself stays
/// opaque and is echoed back when nothing was detected.
const HOVER_ACTION: &str = "hover";

/// The in-page bridge agent. One per page load; owns the singleton
/// overlay and handles one inbound message at a time.
pub struct BridgeAgent<D: DomPort> {
    dom: D,
    config: BridgeConfig,
    overlay: OverlayManager,
}

impl<D: DomPort> BridgeAgent<D> {
    pub fn new(dom: D, config: BridgeConfig) -> Self {
        Self {
            dom,
            config,
            overlay: OverlayManager::new(),
        }
    }

    /// The document this agent is attached to.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// The overlay node, once a highlight has created it.
    pub fn overlay_node(&self) -> Option<NodeRef> {
        self.overlay.node()
    }

    /// Parse and handle one raw inbound value. Unrecognized tags and
    /// payloads missing expected fields are dropped: the protocol must
    /// coexist with extensions from a parent this agent does not control.
    pub fn handle_raw(&mut self, raw: &Value) -> Option<OutboundMessage> {
        match serde_json::from_value::<InboundMessage>(raw.clone()) {
            Ok(message) => self.handle(message),
            Err(err) => {
                debug!("ignoring unrecognized message: {}", err);
                None
            }
        }
    }

    /// Dispatch one inbound message; the returned value, if any, is
    /// posted back to the requesting context.
    pub fn handle(&mut self, message: InboundMessage) -> Option<OutboundMessage> {
        match message {
            InboundMessage::Highlight { selector } => {
                self.overlay
                    .highlight(&mut self.dom, &selector, &self.config.overlay);
                None
            }
            InboundMessage::ClearHighlight => {
                self.overlay.clear(&mut self.dom);
                None
            }
            InboundMessage::RequestInfo { selector } => {
                // No descriptor, no reply: outbound is suppressed entirely
                // for stale selectors.
                inspect::describe(&self.dom, &selector, &self.config)
                    .map(|data| OutboundMessage::ElementInfo { data })
            }
            InboundMessage::DetectElement { x, y, action } => Some(self.detect(x, y, action)),
        }
    }

    fn detect(&self, x: f64, y: f64, action: String) -> OutboundMessage {
        let Some(element) = detect::resolve_at(&self.dom, x, y, &self.config.excluded_root_tags)
        else {
            return OutboundMessage::NoElementDetected { action };
        };
        match synthesize(&self.dom, element, &self.config.identity_attributes) {
            Some(selector) if action == HOVER_ACTION => OutboundMessage::ElementHovered { selector },
            Some(selector) => OutboundMessage::ElementClicked { selector },
            None => OutboundMessage::NoElementDetected { action },
        }
    }

    /// Serial handling loop: one message runs to completion before the
    /// next is dispatched. Publish failures are logged, never fatal.
    /// Returns the agent when the inbound channel closes so callers can
    /// inspect final state.
    pub async fn run(
        mut self,
        mut inbound: mpsc::Receiver<Value>,
        outbound: Arc<InMemoryBus<OutboundMessage>>,
    ) -> Self {
        while let Some(raw) = inbound.recv().await {
            if let Some(reply) = self.handle_raw(&raw) {
                if let Err(err) = outbound.publish(reply).await {
                    warn!("outbound publish failed: {}", err);
                }
            }
        }
        self
    }
}
