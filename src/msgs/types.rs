use crate::error::ValidationError;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Node ids are 5 bytes of lowercase hex.
pub const NODE_ID_LEN: usize = 10;
/// Network ids are 8 bytes of lowercase hex.
pub const NETWORK_ID_LEN: usize = 16;

/// Sentinel sent in place of a version to tell a peer it must upgrade.
pub const UPGRADE_REQUIRED: &str = "UPGRADE_REQUIRED";

/// The controller's own build version.
pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire form of a config message.
///
/// Field order here is the order of keys on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMsg {
    pub node_id: String,
    pub networks: Vec<String>,
}

/// Wire form of a version message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMsg {
    pub node_id: String,
    pub version: String,
}

/// A `major.minor.patch` version, ordered component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl FromStr for Version {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ValidationError::BadVersion(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(bad());
        }

        let mut nums = [0u64; 3];
        for (slot, part) in nums.iter_mut().zip(&parts) {
            // u64::from_str accepts a leading '+', plain digits only here
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(bad());
            }
            *slot = part.parse().map_err(|_| bad())?;
        }

        Ok(Version {
            major: nums[0],
            minor: nums[1],
            patch: nums[2],
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
