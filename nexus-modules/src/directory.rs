use crossbeam_channel::Sender;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tabnexus::{DiscoveryMessage, PeerDirectory};

/// Basic in-memory implementation of the PeerDirectory trait: named mailboxes shared by all
/// clones. A mailbox whose peer is gone is still returned, sending into it fails.
#[derive(Clone, Debug, Default)]
pub struct MemoryPeerDirectory {
    mailboxes: Arc<RwLock<HashMap<String, Sender<DiscoveryMessage>>>>,
}

impl MemoryPeerDirectory {
    /// Creates new empty MemoryPeerDirectory.
    pub fn new() -> MemoryPeerDirectory {
        MemoryPeerDirectory::default()
    }

    /// Names of the registered peers.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.mailboxes.read().keys().cloned().collect();
        names.sort();

        names
    }
}

impl PeerDirectory for MemoryPeerDirectory {
    fn register(&self, name: &str, mailbox: Sender<DiscoveryMessage>) {
        let previous = self.mailboxes.write().insert(name.to_string(), mailbox);
        if previous.is_some() {
            warn!("Peer directory - duplicate peer name: {}", name)
        }
    }

    fn locate(&self, name: &str) -> Option<Sender<DiscoveryMessage>> {
        self.mailboxes.read().get(name).cloned()
    }

    fn unregister(&self, name: &str) {
        self.mailboxes.write().remove(name);
    }
}
