use crate::steps::browser::{expect_event, name_of, CaseBrowser};
use serde_json::json;
use tabnexus::{EvacuatedData, PeerEvent};

pub fn run() {
	let browser = CaseBrowser::new();

	let mut master = browser.open_tab();
	expect_event(&mut master, PeerEvent::BecameMaster { evacuated: None });

	let mut oldest = browser.open_tab();
	expect_event(&mut master, PeerEvent::NewSlave { slave: name_of(&oldest) });
	expect_event(&mut oldest, PeerEvent::GotMaster { master: name_of(&master) });

	let mut youngest = browser.open_tab();
	expect_event(&mut master, PeerEvent::NewSlave { slave: name_of(&youngest) });
	expect_event(&mut youngest, PeerEvent::GotMaster { master: name_of(&master) });

	master.set_data_to_evacuate(EvacuatedData(json!({ "open_documents": ["a.txt"] })));
	master.dispose();

	// the oldest slave inherits the data and the store
	assert_eq!(Some(name_of(&oldest)), browser.stored_master());
	expect_event(&mut oldest, PeerEvent::LostMaster);
	expect_event(&mut oldest, PeerEvent::BecameMaster {
		evacuated: Some(EvacuatedData(json!({ "open_documents": ["a.txt"] }))),
	});

	// the other slave rediscovers through the name it was given
	expect_event(&mut youngest, PeerEvent::LostMaster);
	expect_event(&mut oldest, PeerEvent::NewSlave { slave: name_of(&youngest) });
	expect_event(&mut youngest, PeerEvent::GotMaster { master: name_of(&oldest) });

	// a tab opened now finds the new master
	let mut newcomer = browser.open_tab();
	expect_event(&mut oldest, PeerEvent::NewSlave { slave: name_of(&newcomer) });
	expect_event(&mut newcomer, PeerEvent::GotMaster { master: name_of(&oldest) });
	assert_eq!(vec![name_of(&youngest), name_of(&newcomer)], oldest.slave_names());

	newcomer.dispose();
	youngest.dispose();
	oldest.dispose();
}
