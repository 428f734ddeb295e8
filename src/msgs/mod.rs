//! Message Codec Module
//!
//! Parses, validates and builds the three wire messages exchanged with nodes:
//!
//! - **Announce**: a bare 10-character hex node id.
//! - **Config**: `{"node_id": ..., "networks": [...]}`, the overlay networks a node must join.
//! - **Version**: `{"node_id": ..., "version": ...}`, used to negotiate protocol compatibility.
//!
//! Validation failures are `ValidationError`s; a version that is too old or malformed is a
//! plain `false`, since mismatches are routine.

pub mod codec;
pub mod types;
pub mod validate;

pub use codec::{build_config_msg, build_version_msg, config_record, parse_version_msg};
pub use types::{
    BUILD_VERSION, ConfigMsg, NETWORK_ID_LEN, NODE_ID_LEN, UPGRADE_REQUIRED, Version, VersionMsg,
};
pub use validate::{valid_announce, valid_config, valid_network_id, valid_node_id, valid_version};
