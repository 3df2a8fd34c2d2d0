use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tabnexus::MasterNameStore;

/// Basic in-memory implementation of the MasterNameStore trait. Clones share the same
/// storage, the way tabs of one browser share cookies.
#[derive(Clone, Debug, Default)]
pub struct MemoryNameStore {
    names: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryNameStore {
    /// Creates new empty MemoryNameStore.
    pub fn new() -> MemoryNameStore {
        MemoryNameStore::default()
    }
}

impl MasterNameStore for MemoryNameStore {
    fn load(&self, key: &str) -> Option<String> {
        self.names.lock().get(key).cloned()
    }

    fn publish(&self, key: &str, name: &str) {
        trace!("Master name for {} set to {}", key, name);
        self.names.lock().insert(key.to_string(), name.to_string());
    }

    fn clear(&self, key: &str) {
        trace!("Master name for {} cleared", key);
        self.names.lock().remove(key);
    }
}
