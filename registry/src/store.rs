//! Tracking requests awaiting responses on one connection
//!
//! When a request is sent it is added under its correlation id. When the
//! response arrives it is looked up by that id and removed.
use std::collections::HashMap;

use crate::ids::RequestId;

/// Mapping from correlation id to the outstanding request
///
/// The store does no locking of its own; see [`crate::ClientState`] for the
/// shareable handle.
#[derive(Debug)]
pub struct PendingRequestStore<R> {
    pending: HashMap<RequestId, R>,
    limit: Option<usize>,
}

impl<R> Default for PendingRequestStore<R> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            limit: None,
        }
    }
}

impl<R> PendingRequestStore<R> {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding at most `limit` distinct correlation ids
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            pending: HashMap::new(),
            limit,
        }
    }

    /// Insert a request, replacing any request already stored under `id`
    ///
    /// If the store is at its limit and `id` is not already present, the
    /// request is dropped.
    pub fn add_pending_request(&mut self, id: RequestId, request: R) {
        if let Some(limit) = self.limit {
            if self.pending.len() >= limit && !self.pending.contains_key(&id) {
                tracing::warn!(request = %id, limit, "pending request limit reached, dropping request");
                return;
            }
        }
        if self.pending.insert(id, request).is_some() {
            tracing::debug!("replaced pending request with the same id");
        }
    }

    pub fn get_pending_request(&self, id: &str) -> Option<&R> {
        self.pending.get(id)
    }

    /// Check if there are any pending requests
    pub fn has_pending_request(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Remove the request stored under `id`, if any
    pub fn delete_pending_request(&mut self, id: &str) {
        let _ = self.take_pending_request(id);
    }

    /// Remove and return the request stored under `id`
    pub fn take_pending_request(&mut self, id: &str) -> Option<R> {
        self.pending.remove(id)
    }

    pub fn clear_pending_requests(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn request_ids(&self) -> impl Iterator<Item = &RequestId> {
        self.pending.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_get() {
        let mut store = PendingRequestStore::new();
        assert!(!store.has_pending_request());

        store.add_pending_request("1234".into(), "somevalue");
        assert!(store.has_pending_request());
        assert_eq!(store.get_pending_request("1234"), Some(&"somevalue"));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store = PendingRequestStore::new();
        store.add_pending_request("1234".into(), "somevalue");

        for id in ["4321", "5678", "1230", "deadc0de"] {
            assert_eq!(store.get_pending_request(id), None);
        }
    }

    #[test]
    fn last_write_wins() {
        let mut store = PendingRequestStore::new();
        store.add_pending_request("1234".into(), "first");
        store.add_pending_request("1234".into(), "second");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_pending_request("1234"), Some(&"second"));
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = PendingRequestStore::new();
        store.add_pending_request("1234".into(), "somevalue");

        store.delete_pending_request("1234");
        assert!(!store.has_pending_request());
        store.delete_pending_request("1234");
        assert!(!store.has_pending_request());
        store.delete_pending_request("never-added");
        assert!(store.is_empty());
    }

    #[test]
    fn take_removes_entry() {
        let mut store = PendingRequestStore::new();
        store.add_pending_request("1234".into(), "somevalue");

        assert_eq!(store.take_pending_request("1234"), Some("somevalue"));
        assert_eq!(store.take_pending_request("1234"), None);
        assert!(!store.has_pending_request());
    }

    #[test]
    fn clear_empties_store() {
        let mut store = PendingRequestStore::new();
        store.add_pending_request("1".into(), 1);
        store.add_pending_request("2".into(), 2);
        assert_eq!(store.len(), 2);

        store.clear_pending_requests();
        assert!(!store.has_pending_request());
        assert_eq!(store.request_ids().count(), 0);
    }

    #[test]
    fn limit_drops_new_ids() {
        let mut store = PendingRequestStore::with_limit(Some(1));
        store.add_pending_request("1234".into(), "first");
        store.add_pending_request("5678".into(), "second");

        assert_eq!(store.get_pending_request("1234"), Some(&"first"));
        assert_eq!(store.get_pending_request("5678"), None);

        // an id already present may still be replaced
        store.add_pending_request("1234".into(), "replacement");
        assert_eq!(store.get_pending_request("1234"), Some(&"replacement"));

        // and room frees up once the outstanding request completes
        store.delete_pending_request("1234");
        store.add_pending_request("5678".into(), "second");
        assert_eq!(store.get_pending_request("5678"), Some(&"second"));
    }
}
