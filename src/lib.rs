#![warn(missing_debug_implementations, unsafe_code)]

#[macro_use] extern crate log;
#[macro_use] extern crate derive_more;


mod common;
mod communication;
mod errors;
mod events;
mod links;
mod registry;
mod hub;
mod client;
mod discovery;


pub use common::{EvacuatedData, Payload, PeerId, Worker, WorkerPool, run_worker};
pub use communication::channel::{ChannelFactory, DirectEndpoint, Endpoint, EndpointPair, endpoint_pair};
pub use communication::messages::{HubEndpoint, HubNotice, PeerEndpoint, PeerRequest};
pub use communication::wire::WireFrame;
pub use errors::{ErrorKind, NexusError, Result, new_err};
pub use events::PeerEvent;
pub use registry::{PeerRegistry, RegisteredPeer};
pub use hub::{HubCoordinator, HubHandle};
pub use hub::configuration::{HubConfiguration, HubLimits};
pub use hub::peer::PeerRole;
pub use client::HubPeer;
pub use discovery::DiscoveryPeer;
pub use discovery::configuration::{DiscoveryConfiguration, DEFAULT_DISCOVERY_TIMEOUT};
pub use discovery::directory::{MasterNameStore, Origin, PeerDirectory};
pub use discovery::messages::DiscoveryMessage;
pub type HubWorker = common::Worker;


pub fn start_hub<Cf>(hub_config: HubConfiguration<Cf>) -> (HubWorker, HubHandle)
where Cf: ChannelFactory {
	let (connect_tx, connect_rx) = crossbeam_channel::unbounded();
	let (error_tx, error_rx) = crossbeam_channel::unbounded();

	let params = hub::worker::HubWorkerParams {
		coordinator: HubCoordinator::new(hub_config.channel_factory),
		limits: hub_config.limits,
		connect_rx,
		error_rx,
	};

	let worker = common::run_worker(hub::worker::run_hub::<Cf>, params);

	(worker, HubHandle::new(connect_tx, error_tx))
}
