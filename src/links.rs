use crossbeam_channel::{Receiver, Select};
use std::fmt::Debug;
use std::time::Duration;

use crate::common::Payload;
use crate::communication::channel::DirectEndpoint;
use crate::errors::{new_err, ErrorKind, Result};
use crate::registry::{PeerRegistry, RegisteredPeer};

/// Direct link to another peer. `C` is whatever else is needed to reach that peer outside
/// the link (nothing for hub peers, a mailbox for discovered peers).
#[derive(Debug)]
pub struct LinkedPeer<Id, C> {
    id: Id,
    endpoint: DirectEndpoint,
    contact: C,
    open: bool,
}

impl<Id, C> RegisteredPeer for LinkedPeer<Id, C>
where
    Id: Clone + Eq + Debug,
{
    type Id = Id;

    fn id(&self) -> &Id {
        &self.id
    }
}

impl<Id, C> LinkedPeer<Id, C> {
    pub fn new(id: Id, endpoint: DirectEndpoint, contact: C) -> LinkedPeer<Id, C> {
        LinkedPeer {
            id,
            endpoint,
            contact,
            open: true,
        }
    }

    /// Drops the link and keeps the identity and contact.
    pub fn into_parts(self) -> (Id, C) {
        (self.id, self.contact)
    }
}

/// Outcome of waiting on a control channel plus every open link.
#[derive(Debug)]
pub enum Selected<M, Id> {
    Control(M),
    ControlClosed,
    Message { sender: Id, payload: Payload },
    LinkClosed(Id),
    Timeout,
}

/// The master link (when slave) and the slave links (when master) of one peer.
#[derive(Debug)]
pub struct PeerLinks<Id, C>
where
    Id: Clone + Eq + Debug,
{
    master: Option<LinkedPeer<Id, C>>,
    slaves: PeerRegistry<LinkedPeer<Id, C>>,
}

impl<Id, C> Default for PeerLinks<Id, C>
where
    Id: Clone + Eq + Debug,
{
    fn default() -> Self {
        PeerLinks {
            master: None,
            slaves: PeerRegistry::new(),
        }
    }
}

impl<Id, C> PeerLinks<Id, C>
where
    Id: Clone + Eq + Debug,
{
    pub fn new() -> PeerLinks<Id, C> {
        PeerLinks::default()
    }

    /// Returns the replaced master link, if any.
    pub fn set_master(
        &mut self,
        id: Id,
        endpoint: DirectEndpoint,
        contact: C,
    ) -> Option<LinkedPeer<Id, C>> {
        self.master.replace(LinkedPeer::new(id, endpoint, contact))
    }

    pub fn clear_master(&mut self) -> Option<LinkedPeer<Id, C>> {
        self.master.take()
    }

    pub fn master_id(&self) -> Option<Id> {
        self.master.as_ref().map(|master| master.id.clone())
    }

    pub fn add_slave(&mut self, id: Id, endpoint: DirectEndpoint, contact: C) -> Result<()> {
        self.slaves.register(LinkedPeer::new(id, endpoint, contact))
    }

    pub fn remove_slave(&mut self, id: &Id) -> Result<LinkedPeer<Id, C>> {
        self.slaves.unregister(id)
    }

    pub fn slave_ids(&self) -> Vec<Id> {
        self.slaves.ids()
    }

    /// Slave links in attach order; the links are closed when the returned values drop.
    pub fn take_slaves(&mut self) -> Vec<LinkedPeer<Id, C>> {
        self.slaves.drain()
    }

    pub fn close_all(&mut self) {
        self.master = None;
        self.slaves.drain();
    }

    pub fn send_to(&self, recipient: &Id, payload: Payload) -> Result<()> {
        let link = match &self.master {
            Some(master) if master.id == *recipient => Some(master),
            _ => self.slaves.get(recipient),
        };

        match link {
            Some(link) => {
                if !link.endpoint.post(payload) {
                    trace!("Link to {:?} is closed, message dropped", recipient);
                }
                Ok(())
            }
            None => new_err(
                ErrorKind::UnknownPeer,
                format!("No link to peer {:?}", recipient),
                String::new(),
            ),
        }
    }

    /// Stops selecting on a link whose other side went away.
    pub fn mark_closed(&mut self, id: &Id) {
        if let Some(master) = self.master.as_mut() {
            if master.id == *id {
                master.open = false;
                return;
            }
        }
        if let Some(slave) = self.slaves.get_mut(id) {
            slave.open = false;
        }
    }

    fn open_receivers(&self) -> Vec<(Id, Receiver<Payload>)> {
        self.master
            .iter()
            .chain(self.slaves.iter())
            .filter(|link| link.open)
            .map(|link| (link.id.clone(), link.endpoint.receiver().clone()))
            .collect()
    }

    /// Waits for the first message on `control` or on any open link.
    pub fn select_with<M>(&self, control: &Receiver<M>, timeout: Duration) -> Selected<M, Id> {
        let receivers = self.open_receivers();

        let mut select = Select::new();
        let control_index = select.recv(control);
        let link_indexes: Vec<usize> = receivers.iter().map(|(_, rx)| select.recv(rx)).collect();

        let operation = match select.select_timeout(timeout) {
            Ok(operation) => operation,
            Err(_) => return Selected::Timeout,
        };
        let index = operation.index();

        if index == control_index {
            return match operation.recv(control) {
                Ok(message) => Selected::Control(message),
                Err(_) => Selected::ControlClosed,
            };
        }

        for ((id, rx), link_index) in receivers.iter().zip(link_indexes) {
            if link_index == index {
                return match operation.recv(rx) {
                    Ok(payload) => Selected::Message {
                        sender: id.clone(),
                        payload,
                    },
                    Err(_) => Selected::LinkClosed(id.clone()),
                };
            }
        }

        unreachable!("selected operation {} has no receiver", index);
    }
}
