use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tabnexus::{endpoint_pair, ChannelFactory, EndpointPair};

/// Basic in-memory implementation of the ChannelFactory trait. Both endpoints live in the
/// same process and buffer until read.
#[derive(Clone, Debug, Default)]
pub struct InProcChannelFactory {
    created: Arc<AtomicU64>,
}

impl InProcChannelFactory {
    /// Creates new InProcChannelFactory.
    pub fn new() -> InProcChannelFactory {
        InProcChannelFactory::default()
    }

    /// Number of channels created by this factory and its clones.
    pub fn created_channels(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }
}

impl ChannelFactory for InProcChannelFactory {
    fn create_channel(&self) -> EndpointPair {
        let number = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        trace!("Direct channel {} created", number);

        let (first, second) = endpoint_pair();
        EndpointPair { first, second }
    }
}
