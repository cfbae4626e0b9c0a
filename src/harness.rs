//! Fixture-driven harness behind the CLI commands.
//!
//! Pages are captured as JSON fixtures and editor traffic as JSON-lines
//! scripts, so selector synthesis and dispatch behavior can be debugged
//! without a live embedding.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::info;

use bridge_agent::{BridgeAgent, BridgeConfig};
use dom_adapter::{DomPort, HeadlessDom, PageFixture};
use editbridge_core_types::{InboundMessage, OutboundMessage};
use editbridge_event_bus::{InMemoryBus, MessageBus};

pub fn load_fixture(path: &Path) -> Result<HeadlessDom> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading page fixture {}", path.display()))?;
    let fixture: PageFixture = serde_json::from_str(&raw)
        .with_context(|| format!("parsing page fixture {}", path.display()))?;
    HeadlessDom::from_fixture(fixture).context("building headless document")
}

pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    let Some(path) = path else {
        return Ok(BridgeConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading bridge config {}", path.display()))?;
    BridgeConfig::from_yaml(&raw).with_context(|| format!("parsing bridge config {}", path.display()))
}

/// Feed a JSON-lines message script through the full pipeline (mpsc in,
/// bus out) and print each outbound message as a JSON line on stdout.
pub async fn replay(page: &Path, messages: &Path, config: BridgeConfig) -> Result<()> {
    let dom = load_fixture(page)?;
    let script = std::fs::read_to_string(messages)
        .with_context(|| format!("reading message script {}", messages.display()))?;

    let outbound = InMemoryBus::<OutboundMessage>::new(256);
    let mut replies = outbound.subscribe();
    let (tx, rx) = mpsc::channel(256);

    let agent = BridgeAgent::new(dom, config);
    let worker = tokio::spawn(agent.run(rx, Arc::clone(&outbound)));

    let mut sent = 0usize;
    for (idx, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let raw: Value = serde_json::from_str(line)
            .with_context(|| format!("parsing message on line {}", idx + 1))?;
        tx.send(raw).await.context("bridge loop stopped early")?;
        sent += 1;
    }
    drop(tx);
    worker.await.context("bridge loop panicked")?;

    let mut received = 0usize;
    while let Ok(reply) = replies.try_recv() {
        println!("{}", serde_json::to_string(&reply)?);
        received += 1;
    }
    info!("replayed {} messages, {} replies", sent, received);
    Ok(())
}

/// One-shot descriptor extraction.
pub fn inspect(page: &Path, selector: &str, config: BridgeConfig) -> Result<()> {
    let dom = load_fixture(page)?;
    match bridge_agent::inspect::describe(&dom, selector, &config) {
        Some(descriptor) => {
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
            Ok(())
        }
        None => bail!("no element matches selector '{selector}'"),
    }
}

/// One-shot point-to-selector resolution.
pub fn synth(page: &Path, x: f64, y: f64, config: BridgeConfig) -> Result<()> {
    let dom = load_fixture(page)?;
    let Some(element) = bridge_agent::detect::resolve_at(&dom, x, y, &config.excluded_root_tags)
    else {
        bail!("nothing actionable at ({x}, {y})");
    };
    match selector_synth::synthesize(&dom, element, &config.identity_attributes) {
        Some(selector) => {
            println!("{selector}");
            Ok(())
        }
        None => bail!("could not identify the element at ({x}, {y})"),
    }
}

/// One-shot overlay placement; prints the resulting overlay geometry.
pub fn highlight(page: &Path, selector: &str, config: BridgeConfig) -> Result<()> {
    let dom = load_fixture(page)?;
    let mut agent = BridgeAgent::new(dom, config);
    agent.handle(InboundMessage::Highlight {
        selector: selector.to_string(),
    });
    let Some(overlay) = agent.overlay_node() else {
        bail!("selector '{selector}' matched nothing; overlay untouched");
    };

    let mut geometry = serde_json::Map::new();
    for property in ["top", "left", "width", "height", "display"] {
        if let Some(value) = agent.dom().inline_style(overlay, property)? {
            geometry.insert(property.to_string(), Value::String(value));
        }
    }
    println!("{}", serde_json::to_string_pretty(&Value::Object(geometry))?);
    Ok(())
}
