//! Room transport abstraction.
//!
//! The match only needs three things from the network: opaque frames to one
//! peer, opaque frames to the whole room, and membership updates. Anything
//! that can provide those implements [`Transport`]. [`LoopbackHub`] is the
//! in-process implementation used by tests and hot-seat online play.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{RwLock, mpsc};

use super::message::PeerId;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0} is not connected to the room")]
    UnknownPeer(PeerId),

    #[error("transport disconnected")]
    Disconnected,
}

/// Something the room delivered to this peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Frame { from: PeerId, bytes: Vec<u8> },
    /// Full member list after a join or leave.
    Membership(Vec<PeerId>),
}

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    fn local_peer(&self) -> PeerId;

    async fn send_to(&self, peer: PeerId, bytes: Vec<u8>) -> Result<(), TransportError>;

    /// Send to every member, this peer included.
    async fn broadcast(&self, bytes: Vec<u8>) -> Result<(), TransportError>;

    /// Next delivered event, or `None` once the transport is closed.
    async fn recv(&mut self) -> Option<TransportEvent>;
}

type Inboxes = BTreeMap<PeerId, mpsc::UnboundedSender<TransportEvent>>;

/// In-process room. Cloning shares the same room.
#[derive(Clone, Default)]
pub struct LoopbackHub {
    inboxes: Arc<RwLock<Inboxes>>,
}

impl LoopbackHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join `peer` to the room and notify every member.
    pub async fn connect(&self, peer: PeerId) -> LoopbackEndpoint {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inboxes = self.inboxes.write().await;
        inboxes.insert(peer, tx);
        Self::announce(&inboxes);
        drop(inboxes);

        tracing::debug!(target: "runtime::transport", %peer, "Peer joined loopback room");
        LoopbackEndpoint {
            peer,
            hub: self.clone(),
            inbox: rx,
        }
    }

    /// Remove `peer` from the room and notify the remaining members.
    pub async fn disconnect(&self, peer: PeerId) {
        let mut inboxes = self.inboxes.write().await;
        if inboxes.remove(&peer).is_some() {
            Self::announce(&inboxes);
            tracing::debug!(target: "runtime::transport", %peer, "Peer left loopback room");
        }
    }

    pub async fn members(&self) -> Vec<PeerId> {
        self.inboxes.read().await.keys().copied().collect()
    }

    /// Deliver a raw frame to `to` as if `from` had sent it.
    pub async fn inject(&self, to: PeerId, from: PeerId, bytes: Vec<u8>) -> Result<(), TransportError> {
        self.deliver(to, from, bytes).await
    }

    async fn deliver(&self, to: PeerId, from: PeerId, bytes: Vec<u8>) -> Result<(), TransportError> {
        let inboxes = self.inboxes.read().await;
        let inbox = inboxes.get(&to).ok_or(TransportError::UnknownPeer(to))?;
        inbox
            .send(TransportEvent::Frame { from, bytes })
            .map_err(|_| TransportError::Disconnected)
    }

    async fn deliver_all(&self, from: PeerId, bytes: Vec<u8>) {
        let inboxes = self.inboxes.read().await;
        for (peer, inbox) in inboxes.iter() {
            let frame = TransportEvent::Frame {
                from,
                bytes: bytes.clone(),
            };
            if inbox.send(frame).is_err() {
                tracing::trace!(target: "runtime::transport", %peer, "Inbox closed, frame dropped");
            }
        }
    }

    fn announce(inboxes: &Inboxes) {
        let members: Vec<PeerId> = inboxes.keys().copied().collect();
        for inbox in inboxes.values() {
            let _ = inbox.send(TransportEvent::Membership(members.clone()));
        }
    }
}

/// One peer's connection to a [`LoopbackHub`].
pub struct LoopbackEndpoint {
    peer: PeerId,
    hub: LoopbackHub,
    inbox: mpsc::UnboundedReceiver<TransportEvent>,
}

impl LoopbackEndpoint {
    pub fn hub(&self) -> &LoopbackHub {
        &self.hub
    }
}

#[async_trait]
impl Transport for LoopbackEndpoint {
    fn local_peer(&self) -> PeerId {
        self.peer
    }

    async fn send_to(&self, peer: PeerId, bytes: Vec<u8>) -> Result<(), TransportError> {
        self.hub.deliver(peer, self.peer, bytes).await
    }

    async fn broadcast(&self, bytes: Vec<u8>) -> Result<(), TransportError> {
        self.hub.deliver_all(self.peer, bytes).await;
        Ok(())
    }

    async fn recv(&mut self) -> Option<TransportEvent> {
        self.inbox.recv().await
    }
}
