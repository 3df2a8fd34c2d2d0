use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tabnexus::{ErrorKind, HubHandle, HubPeer, PeerEvent, Worker};

/// What the tab workers did, shared between them and the case.
#[derive(Clone, Debug, Default)]
pub struct Journal {
	entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
	pub fn record(&self, entry: String) {
		info!("--Journal: {}", entry);
		self.entries.lock().push(entry);
	}

	pub fn contains(&self, entry: &str) -> bool {
		self.entries.lock().iter().any(|recorded| recorded == entry)
	}

	pub fn count(&self, entry: &str) -> usize {
		self.entries.lock().iter().filter(|recorded| *recorded == entry).count()
	}
}

pub struct TabParams {
	pub tab_number: u64,
	pub handle: HubHandle,
	pub journal: Journal,
}

pub fn start_tab_worker(tab_number: u64, handle: HubHandle, journal: Journal) -> Worker {
	let params = TabParams {
		tab_number,
		handle,
		journal,
	};

	tabnexus::run_worker(run_tab, params)
}

/// Greets every master it gets, reports what it hears while master.
fn run_tab(params: TabParams, terminate_worker_rx: Receiver<()>) {
	let TabParams { tab_number, handle, journal } = params;
	let mut peer = HubPeer::connect(&handle).expect("hub is running");

	while terminate_worker_rx.try_recv().is_err() {
		match peer.recv_event(Duration::from_millis(20)) {
			Ok(PeerEvent::BecameMaster { .. }) => {
				journal.record(format!("tab {} master", tab_number));
			}
			Ok(PeerEvent::GotMaster { master }) => {
				if let Err(err) = peer.message_to(master, json!({ "hello": tab_number })) {
					warn!("Tab {} cannot greet master {}: {}", tab_number, master, err);
				}
			}
			Ok(PeerEvent::Message { payload, .. }) => {
				journal.record(format!("tab {} heard {}", tab_number, payload["hello"]));
			}
			Ok(event) => trace!("Tab {} event: {}", tab_number, event),
			Err(err) => {
				if err.kind() != ErrorKind::Timeout {
					error!("Tab {} stopped: {}", tab_number, err);
					break;
				}
			}
		}
	}

	peer.dispose();
}
