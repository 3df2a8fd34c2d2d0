#[macro_use]
extern crate log;
extern crate chrono;
extern crate crossbeam_channel;
extern crate env_logger;

mod steps;

use chrono::prelude::{DateTime, Local};
use std::io::Write;

extern crate nexus_modules;
extern crate tabnexus;

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            let now_str = now.format("%H:%M:%S.%3f").to_string();
            writeln!(buf, "{:5}: {} - {}", record.level(), now_str, record.args())
        })
        .init();
}

fn main() {
    init_logger();

    cases::smoke::run();
    cases::hub_failover::run();
    cases::hub_errors::run();
    cases::hub_disconnect::run();
    cases::tab_workers::run();
    cases::discovery::basic::run();
    cases::discovery::failover::run();
    cases::discovery::stale_name::run();
}
