use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::common::{EvacuatedData, Payload, PeerId};
use crate::communication::messages::{HubNotice, PeerEndpoint, PeerRequest};
use crate::errors::{new_err, ErrorKind, Result};
use crate::events::PeerEvent;
use crate::hub::HubHandle;
use crate::links::{PeerLinks, Selected};


#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
enum ClientRole {
    Undecided,
    Master,
    Slave,
}

/// Peer side of the hub protocol.
///
/// Applies hub notices to its direct links and turns them into `PeerEvent`s. Nothing happens
/// in the background: notices and link messages are processed inside `recv_event`.
#[derive(Debug)]
pub struct HubPeer {
    hub: PeerEndpoint,
    role: ClientRole,
    links: PeerLinks<PeerId, ()>,
    pending: VecDeque<PeerEvent<PeerId>>,
    data_to_evacuate: Option<EvacuatedData>,
}

impl HubPeer {
    /// Connects to a running hub.
    pub fn connect(hub: &HubHandle) -> Result<HubPeer> {
        Ok(HubPeer::new(hub.connect()?))
    }

    pub fn new(hub: PeerEndpoint) -> HubPeer {
        HubPeer {
            hub,
            role: ClientRole::Undecided,
            links: PeerLinks::new(),
            pending: VecDeque::new(),
            data_to_evacuate: None,
        }
    }

    pub fn is_master(&self) -> bool {
        self.role == ClientRole::Master
    }

    pub fn master_id(&self) -> Option<PeerId> {
        self.links.master_id()
    }

    pub fn slave_ids(&self) -> Vec<PeerId> {
        self.links.slave_ids()
    }

    /// Data handed to the successor if this peer dies as master.
    pub fn set_data_to_evacuate(&mut self, data: EvacuatedData) {
        self.data_to_evacuate = Some(data);
    }

    /// Sends a payload over the direct link to the master or to one of the slaves.
    pub fn message_to(&self, recipient: PeerId, payload: Payload) -> Result<()> {
        self.links.send_to(&recipient, payload)
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_event(&mut self, timeout: Duration) -> Result<PeerEvent<PeerId>> {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }

            let wait = deadline.saturating_duration_since(Instant::now());
            match self.links.select_with(self.hub.receiver(), wait) {
                Selected::Control(notice) => self.handle_notice(notice)?,
                Selected::ControlClosed => {
                    return new_err(
                        ErrorKind::Disconnected,
                        "Hub connection closed".to_string(),
                        String::new(),
                    )
                }
                Selected::Message { sender, payload } => {
                    return Ok(PeerEvent::Message { sender, payload })
                }
                Selected::LinkClosed(peer_id) => {
                    debug!("Direct link to {} closed", peer_id);
                    self.links.mark_closed(&peer_id);
                }
                Selected::Timeout => {
                    if Instant::now() >= deadline {
                        return new_err(
                            ErrorKind::Timeout,
                            "No peer events".to_string(),
                            format!("waited {:?}", timeout),
                        );
                    }
                }
            }
        }
    }

    /// Announces the departure to the hub and closes every direct link.
    pub fn dispose(mut self) {
        info!("Peer disposing as {}", self.role);

        let request = PeerRequest::Dying {
            evacuated: self.data_to_evacuate.take(),
        };
        if !self.hub.post(request) {
            debug!("Hub is gone, dying announcement dropped");
        }

        self.links.close_all();
    }

    fn handle_notice(&mut self, notice: HubNotice) -> Result<()> {
        debug!("Received {}", notice);

        match notice {
            HubNotice::BecomeMaster { evacuated } => {
                if self.links.clear_master().is_some() {
                    self.pending.push_back(PeerEvent::LostMaster);
                }
                self.role = ClientRole::Master;
                self.pending.push_back(PeerEvent::BecameMaster { evacuated });
            }
            HubNotice::ConnectToMaster {
                master_id,
                endpoint,
            } => {
                if self.role == ClientRole::Master {
                    return new_err(
                        ErrorKind::ProtocolViolation,
                        "connect_to_master: already master".to_string(),
                        format!("master {}", master_id),
                    );
                }
                if self.links.set_master(master_id, endpoint, ()).is_some() {
                    self.pending.push_back(PeerEvent::LostMaster);
                }
                self.role = ClientRole::Slave;
                self.pending
                    .push_back(PeerEvent::GotMaster { master: master_id });
            }
            HubNotice::AddSlave { slave_id, endpoint } => {
                if self.role != ClientRole::Master {
                    return new_err(
                        ErrorKind::ProtocolViolation,
                        "add_slave: this only works when master".to_string(),
                        format!("slave {}", slave_id),
                    );
                }
                self.links.add_slave(slave_id, endpoint, ())?;
                self.pending.push_back(PeerEvent::NewSlave { slave: slave_id });
            }
            HubNotice::RemoveSlave { slave_id } => {
                self.links.remove_slave(&slave_id)?;
                self.pending
                    .push_back(PeerEvent::LostSlave { slave: slave_id });
            }
            HubNotice::ErrorInWorker { error } => {
                error!("Error in hub: {}", error);
                self.pending
                    .push_back(PeerEvent::HubError { message: error });
            }
        }

        Ok(())
    }
}
