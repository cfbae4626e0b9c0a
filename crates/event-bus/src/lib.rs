//! Message fan-out for the visual edit bridge.
//!
//! The parent editor and the in-page agent exchange messages over a
//! broadcast-style channel with no origin checks and no correlation ids;
//! this crate is the in-process form of that channel. Origin allow-listing
//! and per-request correlation are concerns for embedders to layer above
//! it, not for the bridge core.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::debug;

use editbridge_core_types::BridgeError;

/// Trait implemented by payload types that can be carried on the bus.
pub trait BusMessage: Clone + Send + Sync + std::fmt::Debug + 'static {}

impl<T> BusMessage for T where T: Clone + Send + Sync + std::fmt::Debug + 'static {}

#[async_trait]
pub trait MessageBus<M>: Send + Sync
where
    M: BusMessage,
{
    async fn publish(&self, message: M) -> Result<(), BridgeError>;
    fn subscribe(&self) -> broadcast::Receiver<M>;
}

/// In-memory bus backing both directions of the bridge protocol in the
/// CLI harness and in tests.
pub struct InMemoryBus<M>
where
    M: BusMessage,
{
    sender: broadcast::Sender<M>,
}

impl<M> InMemoryBus<M>
where
    M: BusMessage,
{
    pub fn new(capacity: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self { sender })
    }
}

#[async_trait]
impl<M> MessageBus<M> for InMemoryBus<M>
where
    M: BusMessage,
{
    async fn publish(&self, message: M) -> Result<(), BridgeError> {
        self.sender
            .send(message)
            .map(|_| ())
            .map_err(|err| BridgeError::new(err.to_string()))
    }

    fn subscribe(&self) -> broadcast::Receiver<M> {
        self.sender.subscribe()
    }
}

/// Helper to materialise an mpsc receiver from a bus subscription so the
/// agent loop can await messages without handling broadcast semantics
/// directly.
pub fn to_mpsc<M>(bus: Arc<InMemoryBus<M>>, capacity: usize) -> mpsc::Receiver<M>
where
    M: BusMessage,
{
    let mut rx = bus.subscribe();
    let (tx, out_rx) = mpsc::channel(capacity.max(1));
    tokio::spawn(async move {
        while let Ok(message) = rx.recv().await {
            if tx.send(message).await.is_err() {
                debug!("bus consumer dropped; stopping forwarder");
                break;
            }
        }
    });
    out_rx
}
