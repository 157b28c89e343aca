//! Per-connection view of the outstanding requests
use std::sync::{Arc, Mutex};

use crate::config::RegistryConfig;
use crate::ids::RequestId;
use crate::store::PendingRequestStore;
use crate::sync::with_lock;

/// Handle onto the pending requests of a single connection
///
/// The send path and the receive path of a connection usually run on
/// different threads, so the store sits behind its own mutex. Cloning the
/// handle is cheap and every clone sees the same requests.
#[derive(Debug)]
pub struct ClientState<R> {
    store: Arc<Mutex<PendingRequestStore<R>>>,
}

impl<R> Clone for ClientState<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R> Default for ClientState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ClientState<R> {
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    pub fn with_config(config: &RegistryConfig) -> Self {
        let store = PendingRequestStore::with_limit(config.max_pending_per_connection);
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn add_pending_request(&self, id: impl Into<RequestId>, request: R) {
        let id = id.into();
        tracing::debug!(request = %id, "adding pending request");
        with_lock("ClientState.store", self.store.as_ref(), |mut store| {
            store.add_pending_request(id, request)
        });
    }

    pub fn has_pending_request(&self) -> bool {
        with_lock("ClientState.store", self.store.as_ref(), |store| {
            store.has_pending_request()
        })
    }

    pub fn delete_pending_request(&self, id: &str) {
        tracing::debug!(request = %id, "deleting pending request");
        with_lock("ClientState.store", self.store.as_ref(), |mut store| {
            store.delete_pending_request(id)
        });
    }

    /// Remove and return the request stored under `id`
    ///
    /// Use this when a response arrives: only one caller can ever get the
    /// request back for a given id.
    pub fn take_pending_request(&self, id: &str) -> Option<R> {
        with_lock("ClientState.store", self.store.as_ref(), |mut store| {
            store.take_pending_request(id)
        })
    }

    pub fn clear_pending_requests(&self) {
        tracing::debug!("clearing pending requests");
        with_lock("ClientState.store", self.store.as_ref(), |mut store| {
            store.clear_pending_requests()
        });
    }

    pub fn pending_count(&self) -> usize {
        with_lock("ClientState.store", self.store.as_ref(), |store| store.len())
    }

    /// Whether another handle onto the same store is alive
    pub(crate) fn is_shared(&self) -> bool {
        Arc::strong_count(&self.store) > 1
    }
}

impl<R: Clone> ClientState<R> {
    pub fn get_pending_request(&self, id: &str) -> Option<R> {
        with_lock("ClientState.store", self.store.as_ref(), |store| {
            store.get_pending_request(id).cloned()
        })
    }
}
