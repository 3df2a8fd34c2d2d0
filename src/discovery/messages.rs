use crossbeam_channel::Sender;

use crate::common::EvacuatedData;
use crate::communication::channel::DirectEndpoint;

/// Message delivered to a discovery peer's mailbox.
///
/// Replies travel through the same mailbox as everything else, so a peer sees them in the
/// order they were sent.
#[derive(Debug, Display)]
pub enum DiscoveryMessage {
    /// A new peer asks to become a slave of the receiver.
    #[display(fmt = "add_slave({})", slave_name)]
    AddSlave {
        slave_name: String,
        endpoint: DirectEndpoint,
        reply_to: Sender<DiscoveryMessage>,
    },

    /// The receiver of `AddSlave` is master and has registered the slave.
    #[display(fmt = "slave_accepted({})", master_name)]
    SlaveAccepted { master_name: String },

    /// The receiver of `AddSlave` is not master.
    #[display(fmt = "slave_rejected({})", master_name)]
    SlaveRejected { master_name: String },

    /// A slave leaves.
    #[display(fmt = "remove_slave({})", slave_name)]
    RemoveSlave { slave_name: String },

    /// Sent by a departing master to its oldest slave.
    #[display(fmt = "become_master({:?})", evacuated)]
    BecomeMaster { evacuated: Option<EvacuatedData> },

    /// Sent by a departing master to the remaining slaves.
    #[display(fmt = "get_new_master({})", master_name)]
    GetNewMaster { master_name: String },
}
