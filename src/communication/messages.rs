use crate::common::{EvacuatedData, PeerId};
use crate::communication::channel::{DirectEndpoint, Endpoint};

/// Notification sent by the hub to a connected peer.
#[derive(Debug, Display)]
pub enum HubNotice {
    /// The receiver is now master. Carries the predecessor's evacuated data, if any.
    #[display(fmt = "become_master({:?})", evacuated)]
    BecomeMaster { evacuated: Option<EvacuatedData> },

    /// The receiver is a slave of `master_id` and talks to it over `endpoint`.
    #[display(fmt = "connect_to_master({})", master_id)]
    ConnectToMaster {
        master_id: PeerId,
        endpoint: DirectEndpoint,
    },

    /// A slave was attached to the receiving master.
    #[display(fmt = "add_slave({})", slave_id)]
    AddSlave {
        slave_id: PeerId,
        endpoint: DirectEndpoint,
    },

    /// A slave of the receiving master departed.
    #[display(fmt = "remove_slave({})", slave_id)]
    RemoveSlave { slave_id: PeerId },

    /// Error captured inside the hub, relayed for visibility.
    #[display(fmt = "error_in_worker({})", error)]
    ErrorInWorker { error: String },
}

impl HubNotice {
    pub const BECOME_MASTER: &'static str = "become_master";
    pub const CONNECT_TO_MASTER: &'static str = "connect_to_master";
    pub const ADD_SLAVE: &'static str = "add_slave";
    pub const REMOVE_SLAVE: &'static str = "remove_slave";
    pub const ERROR_IN_WORKER: &'static str = "error_in_worker";

    pub fn tag(&self) -> &'static str {
        match self {
            HubNotice::BecomeMaster { .. } => HubNotice::BECOME_MASTER,
            HubNotice::ConnectToMaster { .. } => HubNotice::CONNECT_TO_MASTER,
            HubNotice::AddSlave { .. } => HubNotice::ADD_SLAVE,
            HubNotice::RemoveSlave { .. } => HubNotice::REMOVE_SLAVE,
            HubNotice::ErrorInWorker { .. } => HubNotice::ERROR_IN_WORKER,
        }
    }
}

/// Request sent by a peer to the hub.
#[derive(Clone, Debug, PartialEq, Display)]
pub enum PeerRequest {
    /// The peer is leaving. A master may pass data for its successor.
    #[display(fmt = "dying({:?})", evacuated)]
    Dying { evacuated: Option<EvacuatedData> },
}

impl PeerRequest {
    pub const DYING: &'static str = "dying";

    pub fn tag(&self) -> &'static str {
        match self {
            PeerRequest::Dying { .. } => PeerRequest::DYING,
        }
    }
}

/// Hub side of a peer connection.
pub type HubEndpoint = Endpoint<HubNotice, PeerRequest>;

/// Peer side of a hub connection.
pub type PeerEndpoint = Endpoint<PeerRequest, HubNotice>;
