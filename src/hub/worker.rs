use crossbeam_channel::{Receiver, Select};

use crate::communication::channel::ChannelFactory;
use crate::communication::messages::HubEndpoint;
use crate::errors::Result;
use crate::hub::configuration::HubLimits;
use crate::hub::HubCoordinator;

pub struct HubWorkerParams<Cf>
where
    Cf: ChannelFactory,
{
    pub coordinator: HubCoordinator<Cf>,
    pub limits: HubLimits,
    pub connect_rx: Receiver<HubEndpoint>,
    pub error_rx: Receiver<String>,
}

/// Hub event loop. Each event is handled to completion before the next select.
pub fn run_hub<Cf>(params: HubWorkerParams<Cf>, terminate_worker_rx: Receiver<()>)
where
    Cf: ChannelFactory,
{
    let HubWorkerParams {
        mut coordinator,
        limits,
        connect_rx,
        error_rx,
    } = params;

    let mut accepting_connections = true;
    let mut accepting_errors = true;

    info!("Hub worker started");
    loop {
        let peer_receivers = coordinator.listening_receivers();

        let mut select = Select::new();
        let terminate_index = select.recv(&terminate_worker_rx);
        let connect_index = if accepting_connections {
            Some(select.recv(&connect_rx))
        } else {
            None
        };
        let error_index = if accepting_errors {
            Some(select.recv(&error_rx))
        } else {
            None
        };
        let peer_indexes: Vec<usize> = peer_receivers
            .iter()
            .map(|(_, rx)| select.recv(rx))
            .collect();

        let operation = select.select();
        let index = operation.index();

        if index == terminate_index {
            if operation.recv(&terminate_worker_rx).is_err() {
                error!("Abnormal exit for hub worker");
            }
            break;
        }

        if Some(index) == connect_index {
            match operation.recv(&connect_rx) {
                Ok(endpoint) => {
                    let result = coordinator.on_peer_connected(endpoint).map(|_| ());
                    check_protocol(result);
                }
                Err(_) => {
                    debug!("All hub handles dropped, no more connections");
                    accepting_connections = false;
                }
            }
            continue;
        }

        if Some(index) == error_index {
            match operation.recv(&error_rx) {
                Ok(error) => {
                    warn!("Error in hub: {}", error);
                    coordinator.send_error_if_possible(error);
                }
                Err(_) => accepting_errors = false,
            }
            continue;
        }

        let position = peer_indexes.iter().position(|peer_index| *peer_index == index);
        if let Some(position) = position {
            let (peer_id, rx) = &peer_receivers[position];
            let result = match operation.recv(rx) {
                Ok(request) => coordinator.handle_request(*peer_id, request),
                Err(_) => coordinator.on_peer_disconnected(*peer_id, limits.detect_disconnects),
            };
            check_protocol(result);
        }
    }
    info!("Hub worker stopped");
}

// Protocol violations mean the coordinator's own bookkeeping is broken.
fn check_protocol(result: Result<()>) {
    if let Err(err) = result {
        error!("Hub protocol violation: {}", err);
        panic!("hub protocol violation: {}", err);
    }
}
