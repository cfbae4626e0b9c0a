//! End-to-end dispatch: raw messages in over mpsc, protocol replies out
//! over the bus, one message handled at a time.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::mpsc;

use bridge_agent::{BridgeAgent, BridgeConfig};
use dom_adapter::{DomPort, FixtureNode, HeadlessDom, PageFixture};
use editbridge_core_types::OutboundMessage;
use editbridge_event_bus::{InMemoryBus, MessageBus};

fn storefront_page() -> HeadlessDom {
    HeadlessDom::from_fixture(PageFixture {
        body: vec![
            FixtureNode::new("main")
                .with_rect(0.0, 0.0, 1280.0, 640.0)
                .with_child(
                    FixtureNode::new("h1")
                        .with_attr("id", "hero")
                        .with_attr("data-source-file", "src/pages/Index.tsx")
                        .with_attr("data-source-line", "18")
                        .with_rect(40.0, 80.0, 720.0, 56.0)
                        .with_text("Summer fragrance drop"),
                )
                .with_child(
                    FixtureNode::new("button")
                        .with_attr("class", "btn btn-primary")
                        .with_rect(140.0, 80.0, 180.0, 48.0)
                        .with_text("Shop now"),
                ),
        ],
        ..PageFixture::default()
    })
    .unwrap()
}

async fn run_script(script: Vec<Value>) -> (Vec<OutboundMessage>, BridgeAgent<HeadlessDom>) {
    let outbound = InMemoryBus::<OutboundMessage>::new(64);
    let mut replies = outbound.subscribe();
    let (tx, rx) = mpsc::channel(64);

    let agent = BridgeAgent::new(storefront_page(), BridgeConfig::default());
    let worker = tokio::spawn(agent.run(rx, Arc::clone(&outbound)));

    for message in script {
        tx.send(message).await.unwrap();
    }
    drop(tx);
    let agent = worker.await.unwrap();

    let mut collected = Vec::new();
    while let Ok(reply) = replies.try_recv() {
        collected.push(reply);
    }
    (collected, agent)
}

#[tokio::test]
async fn replies_arrive_in_handling_order() {
    let script = vec![
        // Overlay traffic produces no replies.
        json!({"type": "VISUAL_EDIT_HIGHLIGHT", "selector": "#hero"}),
        json!({"type": "VISUAL_EDIT_CLEAR_HIGHLIGHT"}),
        // Descriptor for a live selector.
        json!({"type": "VISUAL_EDIT_REQUEST_INFO", "selector": "#hero"}),
        // Stale selector: reply suppressed entirely.
        json!({"type": "VISUAL_EDIT_REQUEST_INFO", "selector": "#retired"}),
        // Unknown tag from a newer parent: ignored.
        json!({"type": "VISUAL_EDIT_MEASURE", "selector": "#hero"}),
        // Pointer tracking over the button, then a click on background.
        json!({"type": "VISUAL_EDIT_DETECT_ELEMENT", "x": 120.0, "y": 160.0, "action": "hover"}),
        json!({"type": "VISUAL_EDIT_DETECT_ELEMENT", "x": 1200.0, "y": 700.0, "action": "click"}),
    ];

    let (replies, agent) = run_script(script).await;
    assert_eq!(replies.len(), 3);

    match &replies[0] {
        OutboundMessage::ElementInfo { data } => {
            assert_eq!(data.selector, "#hero");
            assert_eq!(data.tag_name, "H1");
            assert_eq!(data.text_content, "Summer fragrance drop");
            assert_eq!(data.source_file.as_deref(), Some("src/pages/Index.tsx"));
        }
        other => panic!("expected ELEMENT_INFO, got {other:?}"),
    }
    assert_eq!(
        replies[1],
        OutboundMessage::ElementHovered {
            selector: ".btn.btn-primary".into()
        }
    );
    assert_eq!(
        replies[2],
        OutboundMessage::NoElementDetected {
            action: "click".into()
        }
    );

    // The overlay survived the script hidden, not destroyed.
    let overlay = agent.overlay_node().expect("overlay was created");
    assert_eq!(
        agent.dom().inline_style(overlay, "display").unwrap().as_deref(),
        Some("none")
    );
}

#[tokio::test]
async fn a_bad_request_does_not_break_subsequent_ones() {
    let script = vec![
        json!({"type": "VISUAL_EDIT_HIGHLIGHT", "selector": "main > h1"}),
        json!(42),
        json!({"type": "VISUAL_EDIT_REQUEST_INFO", "selector": ".btn.btn-primary"}),
    ];

    let (replies, _agent) = run_script(script).await;
    assert_eq!(replies.len(), 1);
    match &replies[0] {
        OutboundMessage::ElementInfo { data } => {
            assert_eq!(data.tag_name, "BUTTON");
            assert_eq!(data.class_name, "btn btn-primary");
            assert!(data.source_file.is_none());
        }
        other => panic!("expected ELEMENT_INFO, got {other:?}"),
    }
}
