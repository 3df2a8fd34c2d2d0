use crossbeam_channel::Sender;

use crate::discovery::messages::DiscoveryMessage;

/// Scope of a group of cooperating peers.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Display)]
#[display(fmt = "{}://{}:{:?}", scheme, domain, port)]
pub struct Origin {
    pub scheme: String,
    pub domain: String,
    pub port: Option<u16>,
}

impl Origin {
    pub fn new(scheme: &str, domain: &str, port: Option<u16>) -> Origin {
        Origin {
            scheme: scheme.to_string(),
            domain: domain.to_string(),
            port,
        }
    }

    /// Key under which the master name of this origin is stored.
    pub fn store_key(&self) -> String {
        let port = self.port.map(|port| port.to_string()).unwrap_or_default();

        format!(
            "__CrossNamedWindow_{}_{}_{}",
            port,
            self.scheme.replacen(':', "", 1),
            self.domain
        )
    }
}

/// Shared storage for the name of the current master of each origin.
pub trait MasterNameStore: Send + 'static {
    /// Returns the stored master name, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Stores `name` as the master name.
    fn publish(&self, key: &str, name: &str);

    /// Removes the stored master name.
    fn clear(&self, key: &str);
}

/// Locates the mailbox of a live peer by its name.
pub trait PeerDirectory: Send + 'static {
    /// Makes a peer reachable under `name`.
    fn register(&self, name: &str, mailbox: Sender<DiscoveryMessage>);

    /// Returns the mailbox of the peer named `name`, if that peer is still alive.
    fn locate(&self, name: &str) -> Option<Sender<DiscoveryMessage>>;

    /// Removes the peer named `name`.
    fn unregister(&self, name: &str);
}
