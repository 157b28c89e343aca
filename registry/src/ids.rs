//! Identifiers used to key the registry
use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }
    };
}

string_id!(
    /// Correlation identifier pairing an outgoing request with its response
    ///
    /// Unique within one connection while the request is pending; it may be
    /// reused once the earlier entry has been removed.
    RequestId
);

string_id!(
    /// Name of one connected peer, only used on the accepting side
    ClientId
);

/// Source of correlation identifiers for one connection
///
/// Identifiers are decimal strings of a counter starting at 1.
#[derive(Debug, Default)]
pub struct SequentialRequestIds {
    sequence_number: AtomicU64,
}

impl SequentialRequestIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> RequestId {
        // Use fetch_add return value to ensure atomicity
        let seq = self.sequence_number.fetch_add(1, Ordering::SeqCst) + 1;
        RequestId(seq.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(RequestId::from("1234"), "value");
        assert_eq!(map.get("1234"), Some(&"value"));
        assert_eq!(map.get("4321"), None);
    }

    #[test]
    fn displays_inner_value() {
        assert_eq!(ClientId::new("client1").to_string(), "client1");
    }

    #[test]
    fn sequential_ids_are_unique_across_threads() {
        let ids = Arc::new(SequentialRequestIds::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..100).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate correlation id");
            }
        }
        assert_eq!(seen.len(), 400);
        assert!(seen.contains("1"));
        assert!(seen.contains("400"));
    }
}
