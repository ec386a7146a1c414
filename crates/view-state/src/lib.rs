//! Client-side view state shared by every Quintet portal.
//!
//! The controllers here are single-threaded: they share state through `Rc`,
//! run `LocalBoxFuture`s and publish every change on a `tokio::sync::watch`
//! channel that the UI mirrors. Async results are ordered by per-instance
//! request sequence numbers, so a stale response never overwrites a newer one.

pub mod drilldown;
pub mod mutation;
pub mod resource;
pub mod role_gate;
pub mod session;
pub mod storage;

// View helpers
pub mod analytics;
pub mod catalog;
pub mod content;
pub mod grading;

pub use drilldown::{DetailDrilldown, DetailRecord, DetailStatus, DrilldownState};
pub use mutation::{
    Confirm, DispatchOutcome, MutationDispatcher, MutationRequest, Notice, NoticeLevel, Notify,
    PendingKey,
};
pub use resource::{FetchSet, LoadStatus, Refreshable, ResourceLoader, ResourceState};
pub use role_gate::GateState;
pub use session::{SessionState, SessionStore};
pub use storage::{KeyValueStore, MemoryStore};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
