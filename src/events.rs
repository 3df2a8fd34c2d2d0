use crate::common::{EvacuatedData, Payload};

/// What the embedding application observes on a peer.
///
/// `Id` is the identifier of the other peers: the hub-assigned id, or the window name for
/// peers that discover each other by name.
#[derive(Clone, Debug, PartialEq, Display)]
pub enum PeerEvent<Id> {
    /// This peer is now master. Can follow a period as slave.
    #[display(fmt = "became master, evacuated {:?}", evacuated)]
    BecameMaster { evacuated: Option<EvacuatedData> },

    /// Keep the master id to send it messages.
    #[display(fmt = "got master {}", master)]
    GotMaster { master: Id },

    /// Forget the previous master.
    #[display(fmt = "lost master")]
    LostMaster,

    /// Keep the slave id to send it messages.
    #[display(fmt = "new slave {}", slave)]
    NewSlave { slave: Id },

    /// Forget this slave.
    #[display(fmt = "lost slave {}", slave)]
    LostSlave { slave: Id },

    /// Payload received over a direct link.
    #[display(fmt = "message from {}: {}", sender, payload)]
    Message { sender: Id, payload: Payload },

    /// Error relayed by the hub.
    #[display(fmt = "hub error: {}", message)]
    HubError { message: String },
}
