use std::thread;
use std::time::{Duration, Instant};

pub mod browser;
pub mod tabs;

pub fn sleep_ms(milliseconds : u64) {
	thread::sleep(Duration::from_millis(milliseconds));
}

pub fn get_event_timeout() -> Duration {
	Duration::from_millis(2000)
}

pub fn get_discovery_timeout() -> Duration {
	Duration::from_millis(100)
}

pub fn wait_until<F>(condition: F, timeout: Duration) -> bool
where F: Fn() -> bool {
	let deadline = Instant::now() + timeout;
	while Instant::now() < deadline {
		if condition() {
			return true;
		}
		sleep_ms(10);
	}

	condition()
}
