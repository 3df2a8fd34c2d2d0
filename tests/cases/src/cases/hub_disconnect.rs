use crate::steps;
use tabnexus::{HubLimits, PeerEvent};

// Tabs that vanish without saying goodbye.
pub fn run() {
	closed_slave_is_removed();
	closed_master_is_replaced();
	closed_tab_is_kept_without_detection();
}

fn closed_slave_is_removed() {
	let hub = steps::hub::start_hub();

	let mut master = hub.connect_tab();
	steps::hub::expect_event(&mut master, PeerEvent::BecameMaster { evacuated: None });
	let mut slave = hub.connect_tab();
	steps::hub::expect_event(&mut slave, PeerEvent::GotMaster { master: 1 });
	steps::hub::expect_event(&mut master, PeerEvent::NewSlave { slave: 2 });

	drop(slave);

	steps::hub::expect_event(&mut master, PeerEvent::LostSlave { slave: 2 });

	master.dispose();
	hub.terminate();
}

fn closed_master_is_replaced() {
	let hub = steps::hub::start_hub();

	let mut master = hub.connect_tab();
	steps::hub::expect_event(&mut master, PeerEvent::BecameMaster { evacuated: None });
	let mut slave = hub.connect_tab();
	steps::hub::expect_event(&mut slave, PeerEvent::GotMaster { master: 1 });
	steps::hub::expect_event(&mut master, PeerEvent::NewSlave { slave: 2 });

	drop(master);

	steps::hub::expect_event(&mut slave, PeerEvent::LostMaster);
	steps::hub::expect_event(&mut slave, PeerEvent::BecameMaster { evacuated: None });

	slave.dispose();
	hub.terminate();
}

fn closed_tab_is_kept_without_detection() {
	let hub = steps::hub::start_hub_with_limits(HubLimits { detect_disconnects: false });

	let mut master = hub.connect_tab();
	steps::hub::expect_event(&mut master, PeerEvent::BecameMaster { evacuated: None });
	let mut slave = hub.connect_tab();
	steps::hub::expect_event(&mut slave, PeerEvent::GotMaster { master: 1 });
	steps::hub::expect_event(&mut master, PeerEvent::NewSlave { slave: 2 });

	drop(slave);

	// the hub keeps the tab, only the direct link tells the master
	assert!(master.recv_event(std::time::Duration::from_millis(200)).is_err());
	assert_eq!(vec![2], master.slave_ids());

	master.dispose();
	hub.terminate();
}
