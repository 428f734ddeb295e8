//! Work Queue Module
//!
//! Ordered, duplicate-permitting queues that carry node ids and config messages between
//! the stages of the registration handshake.
//!
//! ## Submodules
//! - **`types`**: `WorkQueue`, the tagged `QueueEntry` union and the `KeyedEntry` lookup trait.
//! - **`ops`**: order-preserving removal and key lookup shared by every stage.
//! - **`store`**: snapshot persistence of queues into a state directory.

pub mod ops;
pub mod store;
pub mod types;

pub use ops::{check_return_status, find_by_key, remove_all};
pub use store::QueueStore;
pub use types::{KeyedEntry, KeyedRecord, QueueEntry, WorkQueue};
