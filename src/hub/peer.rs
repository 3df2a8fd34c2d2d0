use crossbeam_channel::Receiver;

use crate::common::{EvacuatedData, PeerId};
use crate::communication::channel::DirectEndpoint;
use crate::communication::messages::{HubEndpoint, HubNotice, PeerRequest};
use crate::registry::RegisteredPeer;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum PeerRole {
    Connecting,
    Master,
    Slave,
}

/// Hub-side wrapper of a connected peer. Owns the hub end of the peer's channel; dropping
/// it closes the channel.
#[derive(Debug)]
pub struct ConnectedPeer {
    id: PeerId,
    role: PeerRole,
    endpoint: HubEndpoint,
    listening: bool,
}

impl RegisteredPeer for ConnectedPeer {
    type Id = PeerId;

    fn id(&self) -> &PeerId {
        &self.id
    }
}

impl ConnectedPeer {
    pub fn new(id: PeerId, endpoint: HubEndpoint) -> ConnectedPeer {
        ConnectedPeer {
            id,
            role: PeerRole::Connecting,
            endpoint,
            listening: true,
        }
    }

    pub fn role(&self) -> PeerRole {
        self.role
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn stop_listening(&mut self) {
        self.listening = false;
    }

    pub fn request_rx(&self) -> Receiver<PeerRequest> {
        self.endpoint.receiver().clone()
    }

    pub fn become_master(&mut self, evacuated: Option<EvacuatedData>) {
        self.role = PeerRole::Master;
        self.notify(HubNotice::BecomeMaster { evacuated });
    }

    pub fn become_slave(&mut self, master_id: PeerId, endpoint: DirectEndpoint) {
        self.role = PeerRole::Slave;
        self.notify(HubNotice::ConnectToMaster {
            master_id,
            endpoint,
        });
    }

    pub fn add_slave(&self, slave_id: PeerId, endpoint: DirectEndpoint) {
        self.notify(HubNotice::AddSlave { slave_id, endpoint });
    }

    pub fn remove_slave(&self, slave_id: PeerId) {
        self.notify(HubNotice::RemoveSlave { slave_id });
    }

    pub fn send_error(&self, error: String) {
        self.notify(HubNotice::ErrorInWorker { error });
    }

    fn notify(&self, notice: HubNotice) {
        trace!("Peer {} Sending {}", self.id, notice);

        if !self.endpoint.post(notice) {
            trace!("Peer {} endpoint is closed, notice dropped", self.id);
        }
    }
}
