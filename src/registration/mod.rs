//! Registration Module
//!
//! Drives announced nodes toward registration: nodes already registered have their stale
//! waiting markers cleared, the rest queue up in `wait_q` until their config arrives or
//! the config-wait fallback registers them.

pub mod machine;

pub use machine::{drain_to_wait, expire_waiting, reconcile, register};
