//! In-Memory Adapters
//!
//! Implements the claims domain ports against process memory. Used by the
//! test suite and by local development setups that do not reach the hosted
//! backend. The claim store honors the same compare-and-swap contract a real
//! backend must provide: the expectation check and the write happen under
//! one lock, so racing writers observe a genuine conflict.

pub mod directory;
pub mod event_log;
pub mod store;

pub use directory::InMemoryDirectory;
pub use event_log::InMemoryEventLog;
pub use store::InMemoryClaimStore;
