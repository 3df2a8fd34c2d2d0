use crossbeam_channel::{Receiver, Sender};
use std::thread;
use std::thread::JoinHandle;

/// Identifier the hub assigns to a connected peer.
pub type PeerId = u64;

/// Opaque application data carried over direct master-slave links.
pub type Payload = serde_json::Value;

/// Opaque state a departing master hands to its successor.
#[derive(Clone, Debug, PartialEq, Display)]
#[display(fmt = "{}", _0)]
pub struct EvacuatedData(pub serde_json::Value);

impl EvacuatedData {
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for EvacuatedData {
    fn from(value: serde_json::Value) -> Self {
        EvacuatedData(value)
    }
}

/// Thread handle paired with its termination signal.
#[derive(Debug)]
pub struct Worker {
    pub join_handle: JoinHandle<()>,
    pub terminate_worker_tx: Sender<()>,
}

impl Worker {
    pub fn terminate(&self) {
        if self.terminate_worker_tx.send(()).is_err() {
            warn!("Cannot send termination signal: worker already stopped")
        }
    }

    pub fn join(self) {
        if self.join_handle.join().is_err() {
            error!("Worker panicked")
        }
    }
}

pub fn run_worker<T: Send + 'static, F: Fn(T, Receiver<()>) + Send + 'static>(
    worker: F,
    params: T,
) -> Worker {
    let (terminate_worker_tx, terminate_worker_rx): (Sender<()>, Receiver<()>) =
        crossbeam_channel::unbounded();

    let join_handle = thread::spawn(move || worker(params, terminate_worker_rx));

    Worker {
        join_handle,
        terminate_worker_tx,
    }
}

#[derive(Debug, Default)]
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new(workers: Vec<Worker>) -> WorkerPool {
        WorkerPool { workers }
    }

    pub fn push(&mut self, worker: Worker) {
        self.workers.push(worker);
    }

    pub fn terminate(&self) {
        for worker in &self.workers {
            worker.terminate();
        }
    }

    pub fn join(self) {
        for worker in self.workers {
            worker.join();
        }
    }
}
