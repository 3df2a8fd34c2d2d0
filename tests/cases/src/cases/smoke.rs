use crate::steps;
use serde_json::json;
use tabnexus::{EvacuatedData, PeerEvent};

pub fn run() {
	let hub = steps::hub::start_hub();

	// first tab is master
	let mut tab_a = hub.connect_tab();
	steps::hub::expect_event(&mut tab_a, PeerEvent::BecameMaster { evacuated: None });

	let mut tab_b = hub.connect_tab();
	steps::hub::expect_event(&mut tab_b, PeerEvent::GotMaster { master: 1 });
	steps::hub::expect_event(&mut tab_a, PeerEvent::NewSlave { slave: 2 });

	let mut tab_c = hub.connect_tab();
	steps::hub::expect_event(&mut tab_c, PeerEvent::GotMaster { master: 1 });
	steps::hub::expect_event(&mut tab_a, PeerEvent::NewSlave { slave: 3 });

	// a slave leaves
	tab_b.dispose();
	steps::hub::expect_event(&mut tab_a, PeerEvent::LostSlave { slave: 2 });

	let mut tab_d = hub.connect_tab();
	steps::hub::expect_event(&mut tab_d, PeerEvent::GotMaster { master: 1 });
	steps::hub::expect_event(&mut tab_a, PeerEvent::NewSlave { slave: 4 });

	// the master leaves with data for its successor
	tab_a.set_data_to_evacuate(EvacuatedData(json!(["some_data"])));
	tab_a.dispose();

	steps::hub::expect_event(&mut tab_c, PeerEvent::LostMaster);
	steps::hub::expect_event(&mut tab_c, PeerEvent::BecameMaster {
		evacuated: Some(EvacuatedData(json!(["some_data"]))),
	});
	steps::hub::expect_event(&mut tab_c, PeerEvent::NewSlave { slave: 4 });

	steps::hub::expect_event(&mut tab_d, PeerEvent::LostMaster);
	steps::hub::expect_event(&mut tab_d, PeerEvent::GotMaster { master: 3 });

	// the new link works both ways
	tab_d.message_to(3, json!({"draft": "hello"})).expect("master is linked");
	steps::hub::expect_event(&mut tab_c, PeerEvent::Message {
		sender: 4,
		payload: json!({"draft": "hello"}),
	});
	tab_c.message_to(4, json!("ack")).expect("slave is linked");
	steps::hub::expect_event(&mut tab_d, PeerEvent::Message {
		sender: 3,
		payload: json!("ack"),
	});

	assert_eq!(4, hub.channel_factory.created_channels());

	tab_d.dispose();
	tab_c.dispose();
	hub.terminate();
}
