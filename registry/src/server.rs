//! Pending requests for every client of a listener
use std::sync::Arc;

use crate::client::ClientState;
use crate::config::RegistryConfig;
use crate::directory::{ConnectionDirectory, SharedLock};
use crate::ids::{ClientId, RequestId};
use crate::sync::{with_read, with_write};

const LOCK_NAME: &str = "ServerState.lock";

/// What the registry knows about one client identifier
///
/// `Unknown` and `Idle` behave the same for every query: neither has a
/// pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientStatus {
    /// Nothing has ever been recorded for the client, or its entry was evicted
    Unknown,
    /// The client has an entry but no outstanding request
    Idle,
    /// The client has at least one outstanding request
    Pending,
}

/// Server side registry of pending requests, keyed by client
///
/// The lock is handed in by the caller and is shared with the connection
/// directory, so every operation here is consistent with client presence.
/// Mutations take the write guard, queries take the read guard.
#[derive(Debug)]
pub struct ServerState<R> {
    lock: SharedLock<R>,
    config: RegistryConfig,
}

impl<R> Clone for ServerState<R> {
    fn clone(&self) -> Self {
        Self {
            lock: Arc::clone(&self.lock),
            config: self.config.clone(),
        }
    }
}

impl<R> ServerState<R> {
    pub fn new(lock: SharedLock<R>) -> Self {
        Self::with_config(lock, RegistryConfig::default())
    }

    pub fn with_config(lock: SharedLock<R>, config: RegistryConfig) -> Self {
        Self { lock, config }
    }

    /// The lock shared with the connection directory
    pub fn lock(&self) -> &SharedLock<R> {
        &self.lock
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Record a pending request for a client, creating the client's entry on
    /// first use
    pub fn add_pending_request(
        &self,
        client_id: impl Into<ClientId>,
        request_id: impl Into<RequestId>,
        request: R,
    ) {
        let client_id = client_id.into();
        let request_id = request_id.into();
        tracing::debug!(client = %client_id, request = %request_id, "adding pending request");
        with_write(LOCK_NAME, self.lock.as_ref(), |mut directory| {
            directory
                .pending
                .entry(client_id)
                .or_insert_with(|| ClientState::with_config(&self.config))
                .add_pending_request(request_id, request);
        });
    }

    /// Handle onto a client's pending requests, `None` if the client is unknown
    pub fn client_state(&self, client_id: &str) -> Option<ClientState<R>> {
        with_read(LOCK_NAME, self.lock.as_ref(), |directory| {
            directory.pending.get(client_id).cloned()
        })
    }

    pub fn client_status(&self, client_id: &str) -> ClientStatus {
        with_read(LOCK_NAME, self.lock.as_ref(), |directory| {
            match directory.pending.get(client_id) {
                None => ClientStatus::Unknown,
                Some(state) if state.has_pending_request() => ClientStatus::Pending,
                Some(_) => ClientStatus::Idle,
            }
        })
    }

    pub fn has_pending_request(&self, client_id: &str) -> bool {
        self.client_status(client_id) == ClientStatus::Pending
    }

    /// Check whether any client has an outstanding request
    pub fn has_pending_requests(&self) -> bool {
        with_read(LOCK_NAME, self.lock.as_ref(), |directory| {
            directory
                .pending
                .values()
                .any(ClientState::has_pending_request)
        })
    }

    /// Drop every pending request of one client
    ///
    /// The client's entry is kept, empty, unless `evict_idle_clients` is set
    /// and no handle from [`ServerState::client_state`] is still held.
    pub fn clear_client_pending_request(&self, client_id: &str) {
        tracing::debug!(client = %client_id, "clearing client pending requests");
        with_write(LOCK_NAME, self.lock.as_ref(), |mut directory| {
            self.clear_client(&mut directory, client_id);
        });
    }

    pub fn clear_all_pending_requests(&self) {
        tracing::debug!("clearing all pending requests");
        with_write(LOCK_NAME, self.lock.as_ref(), |mut directory| {
            for state in directory.pending.values() {
                state.clear_pending_requests();
            }
            if self.config.evict_idle_clients {
                directory.pending.retain(|_, state| state.is_shared());
            }
        });
    }

    /// Remove one pending request; unknown clients and ids are ignored
    pub fn delete_pending_request(&self, client_id: &str, request_id: &str) {
        tracing::debug!(client = %client_id, request = %request_id, "deleting pending request");
        with_write(LOCK_NAME, self.lock.as_ref(), |directory| {
            if let Some(state) = directory.pending.get(client_id) {
                state.delete_pending_request(request_id);
            }
        });
    }

    /// Remove and return one pending request
    pub fn take_pending_request(&self, client_id: &str, request_id: &str) -> Option<R> {
        with_write(LOCK_NAME, self.lock.as_ref(), |directory| {
            directory
                .pending
                .get(client_id)
                .and_then(|state| state.take_pending_request(request_id))
        })
    }

    /// Remove a client from the connection directory and drop its pending
    /// requests under a single write guard
    ///
    /// Returns whether the client was registered as connected.
    pub fn disconnect_client(&self, client_id: &str) -> bool {
        with_write(LOCK_NAME, self.lock.as_ref(), |mut directory| {
            let was_connected = directory.unregister(client_id);
            self.clear_client(&mut directory, client_id);
            was_connected
        })
    }

    /// Every client identifier with an entry, sorted
    pub fn known_clients(&self) -> Vec<ClientId> {
        let mut clients = with_read(LOCK_NAME, self.lock.as_ref(), |directory| {
            directory.pending.keys().cloned().collect::<Vec<_>>()
        });
        clients.sort();
        clients
    }

    fn clear_client(&self, directory: &mut ConnectionDirectory<R>, client_id: &str) {
        let Some(state) = directory.pending.get(client_id) else {
            return;
        };
        state.clear_pending_requests();
        // an entry with live handles stays, or adds through them would be lost
        if self.config.evict_idle_clients && !state.is_shared() {
            directory.pending.remove(client_id);
        }
    }
}
