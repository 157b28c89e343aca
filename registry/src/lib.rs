//! Pending request registry
//!
//! Tracks requests that have been sent over a persistent OCPP-J style
//! connection but not yet answered, keyed by their correlation id, so that a
//! response can be matched to the call that produced it.
//!
//! - [`ClientState`] is used on the initiating side: one per connection.
//! - [`ServerState`] is used on the accepting side: one per listener, holding
//!   a [`ClientState`] per connected client, guarded by a lock shared with the
//!   [`ConnectionDirectory`].
//!
//! Nothing here fails. Looking up an unknown client or correlation id gives
//! `None`, and removing one is a no-op; interpreting an unmatched response is
//! up to the caller.
//!
//! ```
//! use registry::{ConnectionDirectory, ServerState};
//!
//! let lock = ConnectionDirectory::shared();
//! let state = ServerState::new(lock.clone());
//!
//! state.add_pending_request("client1", "0001", "BootNotification");
//! assert!(state.has_pending_requests());
//!
//! let request = state
//!     .client_state("client1")
//!     .and_then(|client| client.get_pending_request("0001"));
//! assert_eq!(request, Some("BootNotification"));
//! ```
mod client;
pub mod config;
mod directory;
pub mod ids;
mod server;
pub mod store;
mod sync;

pub use client::ClientState;
pub use config::RegistryConfig;
pub use directory::{ConnectionDirectory, SharedLock};
pub use ids::{ClientId, RequestId, SequentialRequestIds};
pub use server::{ClientStatus, ServerState};
pub use store::PendingRequestStore;
