#[macro_use]
extern crate log;
extern crate crossbeam_channel;
extern crate tabnexus;

mod channel;
mod directory;
mod names;
mod store;

pub use channel::InProcChannelFactory;
pub use directory::MemoryPeerDirectory;
pub use names::random_peer_name;
pub use store::MemoryNameStore;
