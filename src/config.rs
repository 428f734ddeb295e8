//! Controller Configuration
//!
//! Command-line options with environment fallbacks. Everything has a default so a bare
//! `node-controller` starts an in-memory controller on localhost.

use crate::msgs::{BUILD_VERSION, Version};

use anyhow::{Result, bail};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "node-controller")]
#[command(about = "Membership and registration controller for a peer mesh")]
#[command(version)]
pub struct ControllerConfig {
    /// Address of the HTTP ingress.
    #[arg(long, env = "NODE_CTLR_BIND", default_value = "127.0.0.1:9442")]
    pub bind: SocketAddr,

    /// Seconds between reconcile ticks.
    #[arg(long, env = "NODE_CTLR_TICK_SECS", default_value_t = 5)]
    pub tick_secs: u64,

    /// Directory for queue and trie snapshots. In-memory only when unset.
    #[arg(long, env = "NODE_CTLR_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Oldest peer version accepted without an upgrade demand.
    #[arg(long, env = "NODE_CTLR_MIN_VERSION", default_value = BUILD_VERSION)]
    pub min_version: String,

    #[arg(long, env = "NODE_CTLR_LOG", default_value = "info")]
    pub log_level: String,
}

impl ControllerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_secs == 0 {
            bail!("tick interval must be at least one second");
        }
        if let Err(e) = self.min_version.parse::<Version>() {
            bail!("invalid --min-version: {}", e);
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 9442)),
            tick_secs: 5,
            state_dir: None,
            min_version: BUILD_VERSION.to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_from_args() {
        let config = ControllerConfig::try_parse_from([
            "node-controller",
            "--bind",
            "0.0.0.0:7000",
            "--tick-secs",
            "2",
            "--min-version",
            "0.9.5",
            "--state-dir",
            "/tmp/ctlr",
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 7000);
        assert_eq!(config.tick_secs, 2);
        assert_eq!(config.min_version, "0.9.5");
        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/ctlr")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ControllerConfig::default();
        config.min_version = "1.0".to_string();
        assert!(config.validate().is_err());

        let mut config = ControllerConfig::default();
        config.tick_secs = 0;
        assert!(config.validate().is_err());
    }
}
