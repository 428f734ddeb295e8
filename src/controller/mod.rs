//! Controller Module
//!
//! Ties the core together into a running controller.
//!
//! ## Submodules
//! - **`state`**: `ControllerState`, the single owner of every queue and the trie.
//! - **`service`**: `ControllerService`, the serialized entry points and the tick loop.
//! - **`handlers`**: axum handlers exposing the entry points over HTTP.
//! - **`protocol`**: endpoint paths and response bodies.

pub mod handlers;
pub mod protocol;
pub mod service;
pub mod state;

pub use handlers::router;
pub use service::ControllerService;
pub use state::ControllerState;
