pub mod basic;
pub mod failover;
pub mod stale_name;


#[cfg(test)]
mod tests {
	#[test]
	fn test_basic() {
		crate::cases::discovery::basic::run()
	}

	#[test]
	fn test_failover() {
		crate::cases::discovery::failover::run()
	}

	#[test]
	fn test_stale_name() {
		crate::cases::discovery::stale_name::run()
	}
}
