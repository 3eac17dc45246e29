//! Chain persistence
//!
//! The whole chain lives in a single JSON file: a versioned envelope
//! around the block array, pretty-printed for operator inspection.
//! Saving overwrites the file; the containing directory is created on
//! demand.
//!
//! An absent file is not an error (a fresh ledger starts from genesis),
//! but a file that exists and fails to decode is surfaced as
//! [`Error::CorruptChain`] rather than silently discarded.

use crate::{
    error::{Error, Result},
    types::Block,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Chain file format version; any layout change bumps this
pub const CHAIN_FORMAT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct ChainFile {
    version: u32,
    blocks: Vec<Block>,
}

#[derive(Serialize)]
struct ChainFileRef<'a> {
    version: u32,
    blocks: &'a [Block],
}

/// File-backed chain storage
#[derive(Debug, Clone)]
pub struct ChainStore {
    path: PathBuf,
}

impl ChainStore {
    /// Create a store for the given chain file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Chain file path
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the persisted chain
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(&self) -> Result<Option<Vec<Block>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: ChainFile = serde_json::from_str(&raw).map_err(|e| {
            Error::CorruptChain(format!("{}: {}", self.path.display(), e))
        })?;

        if file.version != CHAIN_FORMAT_VERSION {
            return Err(Error::CorruptChain(format!(
                "{}: unsupported chain format version {} (expected {})",
                self.path.display(),
                file.version,
                CHAIN_FORMAT_VERSION
            )));
        }

        tracing::debug!(
            path = %self.path.display(),
            blocks = file.blocks.len(),
            "Loaded chain file"
        );

        Ok(Some(file.blocks))
    }

    /// Serialize the whole chain and overwrite the file
    pub fn save(&self, blocks: &[Block]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let body = serde_json::to_string_pretty(&ChainFileRef {
            version: CHAIN_FORMAT_VERSION,
            blocks,
        })?;
        fs::write(&self.path, body)?;

        tracing::debug!(
            path = %self.path.display(),
            blocks = blocks.len(),
            "Saved chain file"
        );

        Ok(())
    }
}
