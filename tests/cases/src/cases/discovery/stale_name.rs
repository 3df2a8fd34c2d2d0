use crate::steps::browser::{expect_event, name_of, CaseBrowser};
use tabnexus::{PeerDirectory, PeerEvent};

// The store names a master that cannot answer.
pub fn run() {
	closed_master_name();
	unresponsive_master();
}

fn closed_master_name() {
	let browser = CaseBrowser::new();
	browser.store_master("_CNW_closedlongago");

	let mut tab = browser.open_tab();

	assert!(tab.is_master());
	expect_event(&mut tab, PeerEvent::BecameMaster { evacuated: None });
	assert_eq!(Some(name_of(&tab)), browser.stored_master());

	tab.dispose();
}

fn unresponsive_master() {
	let browser = CaseBrowser::new();
	let (frozen_tx, _frozen_rx) = crossbeam_channel::unbounded();
	browser.directory.register("_CNW_frozen", frozen_tx);
	browser.store_master("_CNW_frozen");

	let mut tab = browser.open_tab();
	assert!(tab.is_discovering());

	expect_event(&mut tab, PeerEvent::BecameMaster { evacuated: None });
	assert_eq!(Some(name_of(&tab)), browser.stored_master());

	// a late tab joins the tab that took over
	let mut late = browser.open_tab();
	expect_event(&mut tab, PeerEvent::NewSlave { slave: name_of(&late) });
	expect_event(&mut late, PeerEvent::GotMaster { master: name_of(&tab) });

	late.dispose();
	tab.dispose();
}
