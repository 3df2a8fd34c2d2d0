use nexus_modules::{random_peer_name, InProcChannelFactory, MemoryNameStore, MemoryPeerDirectory};
use tabnexus::{DiscoveryConfiguration, DiscoveryPeer, MasterNameStore, Origin, PeerEvent};

pub type Tab = DiscoveryPeer<MemoryNameStore, MemoryPeerDirectory, InProcChannelFactory>;

/// Tabs of one browser share the cookie store and the named windows.
#[derive(Clone, Debug, Default)]
pub struct CaseBrowser {
	pub name_store: MemoryNameStore,
	pub directory: MemoryPeerDirectory,
	pub channel_factory: InProcChannelFactory,
}

impl CaseBrowser {
	pub fn new() -> CaseBrowser {
		CaseBrowser::default()
	}

	pub fn origin() -> Origin {
		Origin::new("https:", "tabs.example.org", Some(8443))
	}

	pub fn open_tab(&self) -> Tab {
		self.open_named_tab(&random_peer_name())
	}

	pub fn open_named_tab(&self, name: &str) -> Tab {
		let config = DiscoveryConfiguration::new(
			name.to_string(),
			CaseBrowser::origin(),
			self.name_store.clone(),
			self.directory.clone(),
			self.channel_factory.clone())
			.with_discovery_timeout(super::get_discovery_timeout());

		DiscoveryPeer::start(config)
	}

	pub fn stored_master(&self) -> Option<String> {
		self.name_store.load(&CaseBrowser::origin().store_key())
	}

	pub fn store_master(&self, name: &str) {
		self.name_store.publish(&CaseBrowser::origin().store_key(), name)
	}
}

pub fn expect_event(tab: &mut Tab, expected: PeerEvent<String>) {
	let event = tab.recv_event(super::get_event_timeout()).expect("tab event received");
	info!("--Tab {} event: {}", tab.name(), event);

	assert_eq!(expected, event);
}

pub fn name_of(tab: &Tab) -> String {
	tab.name().to_string()
}
