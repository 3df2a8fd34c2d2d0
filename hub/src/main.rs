#[macro_use] extern crate log;
extern crate env_logger;
extern crate chrono;
extern crate crossbeam_channel;

use std::time::{Duration, Instant};
use std::io::Write;
use std::thread;

use chrono::prelude::{DateTime, Local};
use crossbeam_channel::Receiver;
use serde_json::json;

extern crate tabnexus;
extern crate nexus_modules;

use tabnexus::{EvacuatedData, HubConfiguration, HubHandle, HubPeer, PeerEvent, WorkerPool};
use nexus_modules::InProcChannelFactory;


fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            writeln!(buf, "{:5}: {} - {}", record.level(), now.format("%H:%M:%S.%3f"), record.args())
        })
        .init();
}

struct TabParams {
    tab_number: usize,
    handle: HubHandle,
}

// The master counts ticks and shares them with its slaves. The count survives master changes.
fn run_tab(params: TabParams, terminate_worker_rx: Receiver<()>) {
    let mut peer = match HubPeer::connect(&params.handle) {
        Ok(peer) => peer,
        Err(err) => {
            error!("Tab {} cannot connect: {}", params.tab_number, err);
            return;
        }
    };

    let mut ticks: u64 = 0;
    let mut next_tick = Instant::now() + get_tick_interval();

    while terminate_worker_rx.try_recv().is_err() {
        match peer.recv_event(get_poll_timeout()) {
            Ok(PeerEvent::BecameMaster { evacuated }) => {
                if let Some(data) = evacuated {
                    ticks = data.into_inner()["ticks"].as_u64().unwrap_or_default();
                }
                info!("Tab {} is master, continuing from tick {}", params.tab_number, ticks);
            }
            Ok(PeerEvent::Message { sender, payload }) => {
                info!("Tab {} got {} from {}", params.tab_number, payload, sender);
            }
            Ok(event) => info!("Tab {} {}", params.tab_number, event),
            Err(err) => trace!("Tab {} {}", params.tab_number, err),
        }

        if peer.is_master() && Instant::now() >= next_tick {
            ticks += 1;
            next_tick = Instant::now() + get_tick_interval();
            for slave_id in peer.slave_ids() {
                if let Err(err) = peer.message_to(slave_id, json!({ "ticks": ticks })) {
                    warn!("Tab {} cannot reach slave {}: {}", params.tab_number, slave_id, err);
                }
            }
            peer.set_data_to_evacuate(EvacuatedData(json!({ "ticks": ticks })));
        }
    }

    info!("Tab {} closing", params.tab_number);
    peer.dispose();
}

fn main() {
    init_logger();

    let tab_count = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(3);

    info!("Hub started with {} tabs", tab_count);
    let config = HubConfiguration::new(InProcChannelFactory::new());
    let (hub_worker, handle) = tabnexus::start_hub(config);

    let mut tabs = Vec::new();
    for tab_number in 1..=tab_count {
        let params = TabParams { tab_number, handle: handle.clone() };
        tabs.push(tabnexus::run_worker(run_tab, params));
        thread::sleep(get_tick_interval());
    }

    // close tabs oldest first, every close moves the master
    let mut remaining = WorkerPool::default();
    for (index, tab) in tabs.into_iter().enumerate() {
        if index + 1 < tab_count {
            thread::sleep(get_tick_interval() * 5);
            tab.terminate();
            tab.join();
        } else {
            remaining.push(tab);
        }
    }

    thread::sleep(get_tick_interval() * 5);
    remaining.terminate();
    remaining.join();

    hub_worker.terminate();
    hub_worker.join();
    info!("Hub stopped");
}

fn get_tick_interval() -> Duration {
    Duration::from_millis(200)
}

fn get_poll_timeout() -> Duration {
    Duration::from_millis(50)
}
