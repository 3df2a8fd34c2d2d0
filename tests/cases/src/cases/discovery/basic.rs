use crate::steps;
use crate::steps::browser::{expect_event, name_of, CaseBrowser};
use serde_json::json;
use tabnexus::PeerEvent;

pub fn run() {
	let browser = CaseBrowser::new();

	let mut master = browser.open_tab();
	expect_event(&mut master, PeerEvent::BecameMaster { evacuated: None });
	assert_eq!(Some(name_of(&master)), browser.stored_master());

	let mut slaves = Vec::new();
	for _ in 0..3 {
		let mut slave = browser.open_tab();
		expect_event(&mut master, PeerEvent::NewSlave { slave: name_of(&slave) });
		expect_event(&mut slave, PeerEvent::GotMaster { master: name_of(&master) });
		slaves.push(slave);
	}

	let slave_names: Vec<String> = slaves.iter().map(name_of).collect();
	assert_eq!(slave_names, master.slave_names());
	assert_eq!(3, browser.channel_factory.created_channels());

	// master broadcasts, every slave answers
	for slave in &slaves {
		master.message_to(slave.name(), json!("state?")).expect("slave is linked");
	}
	for slave in slaves.iter_mut() {
		expect_event(slave, PeerEvent::Message { sender: name_of(&master), payload: json!("state?") });
		slave.message_to(&name_of(&master), json!({ "state": "idle" })).expect("master is linked");
	}
	let mut answered = Vec::new();
	for _ in &slave_names {
		match master.recv_event(steps::get_event_timeout()).expect("answer received") {
			PeerEvent::Message { sender, payload } => {
				assert_eq!(json!({ "state": "idle" }), payload);
				answered.push(sender);
			}
			event => panic!("unexpected event: {}", event),
		}
	}
	answered.sort();
	let mut expected_answers = slave_names.clone();
	expected_answers.sort();
	assert_eq!(expected_answers, answered);

	// the store still names the first tab
	assert_eq!(Some(name_of(&master)), browser.stored_master());

	for slave in slaves {
		slave.dispose();
	}
	for slave_name in &slave_names {
		expect_event(&mut master, PeerEvent::LostSlave { slave: slave_name.clone() });
	}

	master.dispose();
	assert_eq!(None, browser.stored_master());
	assert!(browser.directory.names().is_empty());
}
