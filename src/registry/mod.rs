use std::fmt::Debug;

use crate::errors::{new_err, ErrorKind, Result};

/// Anything the registry can hold: it only needs a stable identity.
pub trait RegisteredPeer {
    type Id: Clone + Eq + Debug;

    fn id(&self) -> &Self::Id;
}

/// Live peers in registration order. The order decides failover succession.
#[derive(Debug)]
pub struct PeerRegistry<P: RegisteredPeer> {
    peers: Vec<P>,
}

impl<P: RegisteredPeer> Default for PeerRegistry<P> {
    fn default() -> Self {
        PeerRegistry { peers: Vec::new() }
    }
}

impl<P: RegisteredPeer> PeerRegistry<P> {
    pub fn new() -> PeerRegistry<P> {
        PeerRegistry::default()
    }

    pub fn register(&mut self, peer: P) -> Result<()> {
        if self.contains(peer.id()) {
            return new_err(
                ErrorKind::ProtocolViolation,
                format!("Peer {:?} is already registered", peer.id()),
                String::new(),
            );
        }

        self.peers.push(peer);
        Ok(())
    }

    pub fn unregister(&mut self, id: &P::Id) -> Result<P> {
        let position = self.peers.iter().position(|peer| peer.id() == id);

        match position {
            Some(position) => Ok(self.peers.remove(position)),
            None => new_err(
                ErrorKind::ProtocolViolation,
                format!("Peer {:?} not removed from registry", id),
                "unknown peer".to_string(),
            ),
        }
    }

    /// Earliest-registered remaining peer.
    pub fn first(&self) -> Option<&P> {
        self.peers.first()
    }

    pub fn pop_first(&mut self) -> Option<P> {
        if self.peers.is_empty() {
            return None;
        }
        Some(self.peers.remove(0))
    }

    pub fn get(&self, id: &P::Id) -> Option<&P> {
        self.peers.iter().find(|peer| peer.id() == id)
    }

    pub fn get_mut(&mut self, id: &P::Id) -> Option<&mut P> {
        self.peers.iter_mut().find(|peer| peer.id() == id)
    }

    pub fn contains(&self, id: &P::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.peers.iter()
    }

    pub fn ids(&self) -> Vec<P::Id> {
        self.peers.iter().map(|peer| peer.id().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn drain(&mut self) -> Vec<P> {
        self.peers.drain(..).collect()
    }
}
