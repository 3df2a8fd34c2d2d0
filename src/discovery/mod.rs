use crossbeam_channel::{Receiver, Sender};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::common::{EvacuatedData, Payload};
use crate::communication::channel::{ChannelFactory, DirectEndpoint};
use crate::errors::{new_err, ErrorKind, Result};
use crate::events::PeerEvent;
use crate::links::{PeerLinks, Selected};

pub mod configuration;
pub mod directory;
pub mod messages;


use configuration::DiscoveryConfiguration;
use directory::{MasterNameStore, PeerDirectory};
use messages::DiscoveryMessage;

type Mailbox = Sender<DiscoveryMessage>;

// Waiting for the answer of a peer that was stored as master.
#[derive(Debug)]
struct Candidate {
    master_name: String,
    mailbox: Mailbox,
    endpoint: DirectEndpoint,
    deadline: Instant,
}

#[derive(Debug)]
enum DiscoveryStatus {
    Discovering(Candidate),
    Master,
    Slave,
}

/// Peer that finds its master by name through a shared store, without a central hub.
///
/// The master publishes its own name. A newcomer reads the name, asks that peer to take it as
/// a slave and waits for the answer. When the master leaves it hands over to its oldest slave
/// and points the other slaves at the successor.
#[derive(Debug)]
pub struct DiscoveryPeer<Ns, Pd, Cf>
where
    Ns: MasterNameStore,
    Pd: PeerDirectory,
    Cf: ChannelFactory,
{
    name: String,
    store_key: String,
    name_store: Ns,
    directory: Pd,
    channel_factory: Cf,
    discovery_timeout: Duration,
    mailbox_tx: Mailbox,
    mailbox_rx: Receiver<DiscoveryMessage>,
    status: DiscoveryStatus,
    links: PeerLinks<String, Mailbox>,
    pending: VecDeque<PeerEvent<String>>,
    data_to_evacuate: Option<EvacuatedData>,
}

impl<Ns, Pd, Cf> DiscoveryPeer<Ns, Pd, Cf>
where
    Ns: MasterNameStore,
    Pd: PeerDirectory,
    Cf: ChannelFactory,
{
    /// Registers the peer under its name and starts looking for the stored master.
    pub fn start(config: DiscoveryConfiguration<Ns, Pd, Cf>) -> DiscoveryPeer<Ns, Pd, Cf> {
        let (mailbox_tx, mailbox_rx) = crossbeam_channel::unbounded();
        config.directory.register(&config.name, mailbox_tx.clone());

        let mut peer = DiscoveryPeer {
            store_key: config.origin.store_key(),
            name: config.name,
            name_store: config.name_store,
            directory: config.directory,
            channel_factory: config.channel_factory,
            discovery_timeout: config.discovery_timeout,
            mailbox_tx,
            mailbox_rx,
            status: DiscoveryStatus::Master,
            links: PeerLinks::new(),
            pending: VecDeque::new(),
            data_to_evacuate: None,
        };

        let stored_name = peer.name_store.load(&peer.store_key);
        info!("Peer {} Existing master name {:?}", peer.name, stored_name);

        match stored_name {
            Some(master_name) if !master_name.is_empty() && master_name != peer.name => {
                peer.discover(master_name)
            }
            _ => peer.become_master(None),
        }

        peer
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_master(&self) -> bool {
        matches!(self.status, DiscoveryStatus::Master)
    }

    pub fn is_discovering(&self) -> bool {
        matches!(self.status, DiscoveryStatus::Discovering(_))
    }

    pub fn master_name(&self) -> Option<String> {
        self.links.master_id()
    }

    pub fn slave_names(&self) -> Vec<String> {
        self.links.slave_ids()
    }

    /// Data handed to the successor if this peer dies as master.
    pub fn set_data_to_evacuate(&mut self, data: EvacuatedData) {
        self.data_to_evacuate = Some(data);
    }

    pub fn message_to(&self, recipient: &str, payload: Payload) -> Result<()> {
        self.links.send_to(&recipient.to_string(), payload)
    }

    /// Waits up to `timeout` for the next event. Discovery deadlines are checked here too.
    pub fn recv_event(&mut self, timeout: Duration) -> Result<PeerEvent<String>> {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }

            let now = Instant::now();
            let mut wait = deadline.saturating_duration_since(now);
            if let DiscoveryStatus::Discovering(candidate) = &self.status {
                wait = wait.min(candidate.deadline.saturating_duration_since(now));
            }

            match self.links.select_with(&self.mailbox_rx, wait) {
                Selected::Control(message) => self.handle_message(message)?,
                Selected::ControlClosed => {
                    return new_err(
                        ErrorKind::Disconnected,
                        "Mailbox closed".to_string(),
                        self.name.clone(),
                    )
                }
                Selected::Message { sender, payload } => {
                    return Ok(PeerEvent::Message { sender, payload })
                }
                Selected::LinkClosed(peer_name) => {
                    debug!("Peer {} Link to {} closed", self.name, peer_name);
                    self.links.mark_closed(&peer_name);
                }
                Selected::Timeout => {
                    let now = Instant::now();
                    if self.discovery_expired(now) {
                        self.abandon_candidate();
                    } else if now >= deadline {
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

    /// Leaves the group. A master hands over to its oldest slave.
    pub fn dispose(mut self) {
        info!("Peer {} disposing", self.name);
        self.directory.unregister(&self.name);

        match std::mem::replace(&mut self.status, DiscoveryStatus::Slave) {
            DiscoveryStatus::Master => self.hand_over(),
            DiscoveryStatus::Slave => {
                if let Some(master) = self.links.clear_master() {
                    let (master_name, mailbox) = master.into_parts();
                    debug!("Peer {} Leaving master {}", self.name, master_name);
                    self.send(&mailbox, DiscoveryMessage::RemoveSlave {
                        slave_name: self.name.clone(),
                    });
                }
            }
            DiscoveryStatus::Discovering(candidate) => {
                // the candidate may already have accepted
                self.send(&candidate.mailbox, DiscoveryMessage::RemoveSlave {
                    slave_name: self.name.clone(),
                });
            }
        }

        self.links.close_all();
    }

    fn hand_over(&mut self) {
        self.name_store.clear(&self.store_key);

        let mut slaves = self.links.take_slaves().into_iter().map(|slave| slave.into_parts());
        let (successor_name, successor_mailbox) = match slaves.next() {
            Some(successor) => successor,
            None => {
                info!("Peer {} Master leaves without slaves", self.name);
                return;
            }
        };

        info!("Peer {} Handing over to {}", self.name, successor_name);

        self.name_store.publish(&self.store_key, &successor_name);
        let evacuated = self.data_to_evacuate.take();
        self.send(&successor_mailbox, DiscoveryMessage::BecomeMaster { evacuated });

        for (slave_name, mailbox) in slaves {
            debug!("Peer {} Pointing {} at {}", self.name, slave_name, successor_name);
            self.send(&mailbox, DiscoveryMessage::GetNewMaster {
                master_name: successor_name.clone(),
            });
        }
    }

    fn handle_message(&mut self, message: DiscoveryMessage) -> Result<()> {
        debug!("Peer {} Received {}", self.name, message);

        match message {
            DiscoveryMessage::AddSlave {
                slave_name,
                endpoint,
                reply_to,
            } => self.on_add_slave(slave_name, endpoint, reply_to),
            DiscoveryMessage::SlaveAccepted { master_name } => {
                self.on_slave_accepted(master_name);
                Ok(())
            }
            DiscoveryMessage::SlaveRejected { master_name } => {
                self.on_slave_rejected(master_name);
                Ok(())
            }
            DiscoveryMessage::RemoveSlave { slave_name } => {
                self.on_remove_slave(slave_name);
                Ok(())
            }
            DiscoveryMessage::BecomeMaster { evacuated } => {
                self.become_master(evacuated);
                Ok(())
            }
            DiscoveryMessage::GetNewMaster { master_name } => {
                self.on_get_new_master(master_name);
                Ok(())
            }
        }
    }

    fn on_add_slave(
        &mut self,
        slave_name: String,
        endpoint: DirectEndpoint,
        reply_to: Mailbox,
    ) -> Result<()> {
        if !self.is_master() {
            info!("Peer {} Not master, rejecting {}", self.name, slave_name);
            self.send(&reply_to, DiscoveryMessage::SlaveRejected {
                master_name: self.name.clone(),
            });
            return Ok(());
        }

        self.links
            .add_slave(slave_name.clone(), endpoint, reply_to.clone())?;
        self.send(&reply_to, DiscoveryMessage::SlaveAccepted {
            master_name: self.name.clone(),
        });

        info!("Peer {} New slave {}", self.name, slave_name);
        self.pending.push_back(PeerEvent::NewSlave { slave: slave_name });

        Ok(())
    }

    fn on_slave_accepted(&mut self, master_name: String) {
        let candidate = match std::mem::replace(&mut self.status, DiscoveryStatus::Slave) {
            DiscoveryStatus::Discovering(candidate) if candidate.master_name == master_name => {
                candidate
            }
            status => {
                self.status = status;
                warn!(
                    "Peer {} Late acceptance from {}, leaving it",
                    self.name, master_name
                );
                if let Some(mailbox) = self.directory.locate(&master_name) {
                    self.send(&mailbox, DiscoveryMessage::RemoveSlave {
                        slave_name: self.name.clone(),
                    });
                }
                return;
            }
        };

        info!("Peer {} Got master {}", self.name, master_name);

        let Candidate {
            master_name,
            mailbox,
            endpoint,
            ..
        } = candidate;
        self.links.set_master(master_name.clone(), endpoint, mailbox);
        self.pending
            .push_back(PeerEvent::GotMaster { master: master_name });
    }

    fn on_slave_rejected(&mut self, master_name: String) {
        let expected = match &self.status {
            DiscoveryStatus::Discovering(candidate) => candidate.master_name == master_name,
            _ => false,
        };

        if expected {
            info!("Peer {} Peer {} is not master", self.name, master_name);
            self.fall_back(&master_name);
        } else {
            debug!("Peer {} Ignoring rejection from {}", self.name, master_name);
        }
    }

    fn on_remove_slave(&mut self, slave_name: String) {
        if !self.is_master() {
            warn!(
                "Peer {} Not master, ignoring departure of {}",
                self.name, slave_name
            );
            return;
        }

        if self.links.remove_slave(&slave_name).is_err() {
            warn!(
                "Peer {} Ignoring departure of unknown slave {}",
                self.name, slave_name
            );
            return;
        }

        info!("Peer {} Lost slave {}", self.name, slave_name);
        self.pending.push_back(PeerEvent::LostSlave { slave: slave_name });
    }

    fn on_get_new_master(&mut self, master_name: String) {
        if self.is_master() {
            warn!(
                "Peer {} Already master, ignoring redirect to {}",
                self.name, master_name
            );
            return;
        }

        if self.links.clear_master().is_some() {
            self.pending.push_back(PeerEvent::LostMaster);
        }
        self.discover(master_name);
    }

    fn discover(&mut self, master_name: String) {
        let mailbox = match self.directory.locate(&master_name) {
            Some(mailbox) => mailbox,
            None => {
                info!("Peer {} Failed to find {}", self.name, master_name);
                self.become_master(None);
                return;
            }
        };

        let channel = self.channel_factory.create_channel();
        let request = DiscoveryMessage::AddSlave {
            slave_name: self.name.clone(),
            endpoint: channel.second,
            reply_to: self.mailbox_tx.clone(),
        };

        if mailbox.send(request).is_err() {
            info!("Peer {} Stored master {} is closed", self.name, master_name);
            self.become_master(None);
            return;
        }

        debug!("Peer {} Asking {} to take it as slave", self.name, master_name);
        self.status = DiscoveryStatus::Discovering(Candidate {
            master_name,
            mailbox,
            endpoint: channel.first,
            deadline: Instant::now() + self.discovery_timeout,
        });
    }

    // The store may have moved on while the candidate was silent.
    fn fall_back(&mut self, tried: &str) {
        match self.name_store.load(&self.store_key) {
            Some(stored) if !stored.is_empty() && stored != tried && stored != self.name => {
                info!("Peer {} Store now names {}, retrying", self.name, stored);
                self.discover(stored);
            }
            _ => self.become_master(None),
        }
    }

    fn become_master(&mut self, evacuated: Option<EvacuatedData>) {
        info!("Peer {} Becoming master", self.name);

        if self.links.clear_master().is_some() {
            self.pending.push_back(PeerEvent::LostMaster);
        }
        self.status = DiscoveryStatus::Master;
        self.name_store.publish(&self.store_key, &self.name);
        self.pending.push_back(PeerEvent::BecameMaster { evacuated });
    }

    fn abandon_candidate(&mut self) {
        let master_name = match &self.status {
            DiscoveryStatus::Discovering(candidate) => candidate.master_name.clone(),
            _ => return,
        };

        info!("Peer {} Timed out waiting for {}", self.name, master_name);
        self.fall_back(&master_name);
    }

    fn discovery_expired(&self, now: Instant) -> bool {
        match &self.status {
            DiscoveryStatus::Discovering(candidate) => now >= candidate.deadline,
            _ => false,
        }
    }

    fn send(&self, mailbox: &Mailbox, message: DiscoveryMessage) {
        let description = message.to_string();
        if mailbox.send(message).is_err() {
            debug!("Peer {} Cannot deliver {}, peer is gone", self.name, description);
        }
    }
}
