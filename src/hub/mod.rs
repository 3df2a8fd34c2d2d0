use crossbeam_channel::{Receiver, Sender};

use crate::common::{EvacuatedData, PeerId};
use crate::communication::channel::{endpoint_pair, ChannelFactory};
use crate::communication::messages::{HubEndpoint, PeerEndpoint, PeerRequest};
use crate::errors::{new_err, ErrorKind, Result};
use crate::registry::{PeerRegistry, RegisteredPeer};

pub mod configuration;
pub mod peer;
pub mod worker;


use peer::{ConnectedPeer, PeerRole};

/// Collects connected peers and decides which one is master.
///
/// Every handler runs to completion before the next one starts, so the registry never shows
/// a non-empty peer set without a master between two calls. Notifications are fire-and-forget.
#[derive(Debug)]
pub struct HubCoordinator<Cf>
where
    Cf: ChannelFactory,
{
    channel_factory: Cf,
    registry: PeerRegistry<ConnectedPeer>,
    master_id: Option<PeerId>,
    last_peer_id: PeerId,
    last_error: Option<String>,
}

impl<Cf> HubCoordinator<Cf>
where
    Cf: ChannelFactory,
{
    pub fn new(channel_factory: Cf) -> HubCoordinator<Cf> {
        HubCoordinator {
            channel_factory,
            registry: PeerRegistry::new(),
            master_id: None,
            last_peer_id: 0,
            last_error: None,
        }
    }

    pub fn master_id(&self) -> Option<PeerId> {
        self.master_id
    }

    pub fn peer_ids(&self) -> Vec<PeerId> {
        self.registry.ids()
    }

    pub fn role_of(&self, id: PeerId) -> Option<PeerRole> {
        self.registry.get(&id).map(|peer| peer.role())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Receivers of every peer the hub still listens to, in registration order.
    pub fn listening_receivers(&self) -> Vec<(PeerId, Receiver<PeerRequest>)> {
        self.registry
            .iter()
            .filter(|peer| peer.is_listening())
            .map(|peer| (*peer.id(), peer.request_rx()))
            .collect()
    }

    /// A peer has connected.
    pub fn on_peer_connected(&mut self, endpoint: HubEndpoint) -> Result<PeerId> {
        self.last_peer_id += 1;
        let peer_id = self.last_peer_id;

        self.registry.register(ConnectedPeer::new(peer_id, endpoint))?;

        match self.master_id {
            None => {
                info!("Peer {} connected, becoming master", peer_id);

                self.master_id = Some(peer_id);
                self.peer_mut(peer_id)?.become_master(None);
            }
            Some(master_id) => {
                info!("Peer {} connected, slave of {}", peer_id, master_id);

                self.connect_slave(master_id, peer_id)?;
            }
        }

        Ok(peer_id)
    }

    pub fn handle_request(&mut self, peer_id: PeerId, request: PeerRequest) -> Result<()> {
        debug!("Peer {} Received {}", peer_id, request);

        match request {
            PeerRequest::Dying { evacuated } => self.on_peer_departed(peer_id, evacuated),
        }
    }

    /// A peer announced its departure.
    pub fn on_peer_departed(
        &mut self,
        peer_id: PeerId,
        evacuated: Option<EvacuatedData>,
    ) -> Result<()> {
        let departed = self.registry.unregister(&peer_id)?;
        let was_master = self.master_id == Some(peer_id);
        drop(departed);

        if !was_master {
            info!("Slave {} departed", peer_id);

            let master_id = self.require_master("remove_slave")?;
            self.peer_mut(master_id)?.remove_slave(peer_id);
            return Ok(());
        }

        self.master_id = None;

        let successor_id = match self.registry.first() {
            Some(successor) => *successor.id(),
            None => {
                info!("Master {} departed, no peers left", peer_id);
                return Ok(());
            }
        };

        info!(
            "Master {} departed, peer {} becomes master",
            peer_id, successor_id
        );

        self.master_id = Some(successor_id);
        self.peer_mut(successor_id)?.become_master(evacuated);

        // old direct links pointed at the departed master
        let slaves: Vec<PeerId> = self
            .registry
            .ids()
            .into_iter()
            .filter(|id| *id != successor_id)
            .collect();

        for slave_id in slaves {
            self.connect_slave(successor_id, slave_id)?;
        }

        Ok(())
    }

    /// The peer's endpoint closed without a `dying` announcement.
    pub fn on_peer_disconnected(&mut self, peer_id: PeerId, detect_disconnects: bool) -> Result<()> {
        if detect_disconnects {
            warn!("Peer {} disconnected without dying, treating as departed", peer_id);

            return self.on_peer_departed(peer_id, None);
        }

        warn!("Peer {} disconnected without dying, keeping it registered", peer_id);
        self.peer_mut(peer_id)?.stop_listening();

        Ok(())
    }

    /// Relays an error to the oldest peer, if there is one.
    pub fn send_error_if_possible(&mut self, error: String) {
        self.last_error = Some(error.clone());

        match self.registry.first() {
            Some(peer) => peer.send_error(error),
            None => debug!("No peers to relay error to: {}", error),
        }
    }

    fn connect_slave(&mut self, master_id: PeerId, slave_id: PeerId) -> Result<()> {
        let channel = self.channel_factory.create_channel();

        // Both sides buffer, so the two notices need no confirmation in between.
        self.peer_mut(slave_id)?.become_slave(master_id, channel.first);
        self.peer_mut(master_id)?.add_slave(slave_id, channel.second);

        Ok(())
    }

    fn require_master(&self, operation: &str) -> Result<PeerId> {
        match self.master_id {
            Some(master_id) => Ok(master_id),
            None => new_err(
                ErrorKind::ProtocolViolation,
                format!("{}: no master", operation),
                String::new(),
            ),
        }
    }

    fn peer_mut(&mut self, peer_id: PeerId) -> Result<&mut ConnectedPeer> {
        match self.registry.get_mut(&peer_id) {
            Some(peer) => Ok(peer),
            None => new_err(
                ErrorKind::ProtocolViolation,
                format!("Peer {} is not registered", peer_id),
                String::new(),
            ),
        }
    }
}

/// Clonable access to a running hub: connect new peers and report hub-side errors.
#[derive(Clone, Debug)]
pub struct HubHandle {
    connect_tx: Sender<HubEndpoint>,
    error_tx: Sender<String>,
}

impl HubHandle {
    pub fn new(connect_tx: Sender<HubEndpoint>, error_tx: Sender<String>) -> HubHandle {
        HubHandle {
            connect_tx,
            error_tx,
        }
    }

    /// Opens a channel to the hub and hands the hub its side.
    pub fn connect(&self) -> Result<PeerEndpoint> {
        let (peer_side, hub_side) = endpoint_pair();

        if let Err(err) = self.connect_tx.send(hub_side) {
            return new_err(
                ErrorKind::Disconnected,
                "Cannot connect to hub".to_string(),
                err.to_string(),
            );
        }

        Ok(peer_side)
    }

    pub fn report_error<E: Into<String>>(&self, error: E) {
        if self.error_tx.send(error.into()).is_err() {
            debug!("Hub is gone, error report dropped");
        }
    }
}
