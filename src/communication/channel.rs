use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use crate::common::Payload;
use crate::errors::{new_err, ErrorKind, Result};

/// One side of a bidirectional channel: sends `Out`, receives `In`.
///
/// Messages sent before the other side starts receiving are buffered. Dropping an endpoint
/// closes it; the other side then observes a disconnect.
#[derive(Debug)]
pub struct Endpoint<Out, In> {
    tx: Sender<Out>,
    rx: Receiver<In>,
}

/// Endpoint of a direct master-slave link.
pub type DirectEndpoint = Endpoint<Payload, Payload>;

/// Creates two cross-wired endpoints: whatever is sent into one is received on the other.
pub fn endpoint_pair<A, B>() -> (Endpoint<A, B>, Endpoint<B, A>) {
    let (a_tx, a_rx): (Sender<A>, Receiver<A>) = crossbeam_channel::unbounded();
    let (b_tx, b_rx): (Sender<B>, Receiver<B>) = crossbeam_channel::unbounded();

    (
        Endpoint { tx: a_tx, rx: b_rx },
        Endpoint { tx: b_tx, rx: a_rx },
    )
}

impl<Out, In> Endpoint<Out, In> {
    /// Fire-and-forget send. Returns false when the other side is already closed.
    pub fn post(&self, message: Out) -> bool {
        self.tx.send(message).is_ok()
    }

    pub fn try_recv(&self) -> Result<Option<In>> {
        match self.rx.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => new_err(
                ErrorKind::Disconnected,
                "Endpoint closed".to_string(),
                String::new(),
            ),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<In> {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => Ok(message),
            Err(RecvTimeoutError::Timeout) => new_err(
                ErrorKind::Timeout,
                "Nothing received".to_string(),
                format!("waited {:?}", timeout),
            ),
            Err(RecvTimeoutError::Disconnected) => new_err(
                ErrorKind::Disconnected,
                "Endpoint closed".to_string(),
                String::new(),
            ),
        }
    }

    /// Receiver half, for selecting over several endpoints at once.
    pub fn receiver(&self) -> &Receiver<In> {
        &self.rx
    }
}

/// Freshly linked pair of direct endpoints.
#[derive(Debug)]
pub struct EndpointPair {
    pub first: DirectEndpoint,
    pub second: DirectEndpoint,
}

/// Produces new direct channels for linking a slave to its master.
pub trait ChannelFactory: Send + 'static {
    fn create_channel(&self) -> EndpointPair;
}
