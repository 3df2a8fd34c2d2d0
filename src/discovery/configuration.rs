use std::time::Duration;

use crate::communication::channel::ChannelFactory;
use crate::discovery::directory::{MasterNameStore, Origin, PeerDirectory};

/// How long a peer waits for the stored master to answer before taking over.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_millis(500);

/// Everything a discovery peer needs to start.
#[derive(Debug)]
pub struct DiscoveryConfiguration<Ns, Pd, Cf>
where
    Ns: MasterNameStore,
    Pd: PeerDirectory,
    Cf: ChannelFactory,
{
    /// Unique name of this peer.
    pub name: String,
    pub origin: Origin,
    pub name_store: Ns,
    pub directory: Pd,
    pub channel_factory: Cf,
    pub discovery_timeout: Duration,
}

impl<Ns, Pd, Cf> DiscoveryConfiguration<Ns, Pd, Cf>
where
    Ns: MasterNameStore,
    Pd: PeerDirectory,
    Cf: ChannelFactory,
{
    pub fn new(
        name: String,
        origin: Origin,
        name_store: Ns,
        directory: Pd,
        channel_factory: Cf,
    ) -> DiscoveryConfiguration<Ns, Pd, Cf> {
        DiscoveryConfiguration {
            name,
            origin,
            name_store,
            directory,
            channel_factory,
            discovery_timeout: DEFAULT_DISCOVERY_TIMEOUT,
        }
    }

    pub fn with_discovery_timeout(mut self, discovery_timeout: Duration) -> Self {
        self.discovery_timeout = discovery_timeout;
        self
    }
}
