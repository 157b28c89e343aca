//! Connected clients and their pending requests, behind one shared lock
//!
//! The connection management code and [`crate::ServerState`] both hold a
//! clone of the same [`SharedLock`]. Whoever holds the write guard sees client
//! presence and pending requests change together, so a client cannot be
//! removed from the directory while a response for one of its requests is
//! being matched.
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::client::ClientState;
use crate::ids::ClientId;

/// The lock shared between connection management and [`crate::ServerState`]
pub type SharedLock<R> = Arc<RwLock<ConnectionDirectory<R>>>;

#[derive(Debug)]
pub struct ConnectionDirectory<R> {
    connected: HashSet<ClientId>,
    pub(crate) pending: HashMap<ClientId, ClientState<R>>,
}

impl<R> Default for ConnectionDirectory<R> {
    fn default() -> Self {
        Self {
            connected: HashSet::new(),
            pending: HashMap::new(),
        }
    }
}

impl<R> ConnectionDirectory<R> {
    /// Create an empty directory wrapped in a lock ready to be shared
    pub fn shared() -> SharedLock<R> {
        Arc::new(RwLock::new(Self::default()))
    }

    /// Record that a client has connected
    ///
    /// Returns false if the client was already connected.
    pub fn register(&mut self, client_id: impl Into<ClientId>) -> bool {
        let client_id = client_id.into();
        tracing::debug!(client = %client_id, "client connected");
        self.connected.insert(client_id)
    }

    /// Forget a connected client
    ///
    /// Pending requests for the client are left alone, see
    /// [`crate::ServerState::disconnect_client`] to drop both at once.
    pub fn unregister(&mut self, client_id: &str) -> bool {
        tracing::debug!(client = %client_id, "client disconnected");
        self.connected.remove(client_id)
    }

    pub fn is_connected(&self, client_id: &str) -> bool {
        self.connected.contains(client_id)
    }

    pub fn connected_clients(&self) -> impl Iterator<Item = &ClientId> {
        self.connected.iter()
    }

    pub fn len(&self) -> usize {
        self.connected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connected.is_empty()
    }
}
