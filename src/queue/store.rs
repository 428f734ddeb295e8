//! Snapshot Persistence
//!
//! Gives the work queues (and the membership trie) crash durability by writing a bincode
//! snapshot per named structure into a state directory. Snapshots are written to a
//! temporary file and renamed into place so a crash mid-write leaves the previous
//! snapshot intact.

use crate::error::CtlrError;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SNAPSHOT_EXT: &str = "bin";

pub struct QueueStore {
    dir: PathBuf,
}

impl QueueStore {
    /// Opens (creating if needed) the state directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CtlrError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::info!("Queue store opened at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, SNAPSHOT_EXT))
    }

    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), CtlrError> {
        let encoded = bincode::serialize(value)?;
        let path = self.path_for(name);
        let tmp = path.with_extension("tmp");

        fs::write(&tmp, &encoded)?;
        fs::rename(&tmp, &path)?;

        tracing::trace!("Saved snapshot {} ({} bytes)", name, encoded.len());
        Ok(())
    }

    /// Loads a snapshot; a missing file yields `T::default()`.
    pub fn load<T>(&self, name: &str) -> Result<T, CtlrError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path_for(name);

        match fs::read(&path) {
            Ok(bytes) => {
                let value = bincode::deserialize(&bytes)?;
                tracing::debug!("Loaded snapshot {} ({} bytes)", name, bytes.len());
                Ok(value)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No snapshot for {}, starting empty", name);
                Ok(T::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
