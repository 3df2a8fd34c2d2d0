use crate::steps;
use crate::steps::tabs::Journal;
use tabnexus::WorkerPool;

// Every tab runs on its own thread; the master thread is stopped and the oldest survivor
// takes over.
pub fn run() {
	let hub = steps::hub::start_hub();
	let journal = Journal::default();

	let first_tab = steps::tabs::start_tab_worker(1, hub.handle.clone(), journal.clone());
	assert!(steps::wait_until(|| journal.contains("tab 1 master"), steps::get_event_timeout()));

	let mut other_tabs = WorkerPool::default();
	for tab_number in 2..=4 {
		other_tabs.push(steps::tabs::start_tab_worker(tab_number, hub.handle.clone(), journal.clone()));
		let greeting = format!("tab 1 heard {}", tab_number);
		assert!(steps::wait_until(|| journal.contains(&greeting), steps::get_event_timeout()));
	}

	first_tab.terminate();
	first_tab.join();

	assert!(steps::wait_until(|| journal.contains("tab 2 master"), steps::get_event_timeout()));
	assert!(steps::wait_until(
		|| journal.contains("tab 2 heard 3") && journal.contains("tab 2 heard 4"),
		steps::get_event_timeout()));
	assert_eq!(1, journal.count("tab 2 master"));
	assert!(!journal.contains("tab 3 master"));

	other_tabs.terminate();
	other_tabs.join();
	hub.terminate();
}
