//! # hearthmode-adapter-storage-json
//!
//! JSON file persistence adapter.
//!
//! ## Responsibilities
//! - Implement the `StateStore` port defined in `hearthmode-app::ports::state_store`
//! - Replace state files atomically (temp file in the same directory, then rename)
//! - Lay out the state directory: `occupancy.json` and `ledger.json`
//!
//! ## Dependency rule
//! Depends on `hearthmode-app` (for port traits) and `hearthmode-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod file_store;

use std::path::{Path, PathBuf};

use hearthmode_domain::ledger::TransitionLedger;
use hearthmode_domain::occupancy::OccupancyState;

pub use error::StorageError;
pub use file_store::JsonFileStore;

/// File name of the persisted occupancy state.
pub const OCCUPANCY_FILE: &str = "occupancy.json";
/// File name of the persisted transition ledger.
pub const LEDGER_FILE: &str = "ledger.json";

/// The directory holding both state files.
#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn occupancy(&self) -> JsonFileStore<OccupancyState> {
        JsonFileStore::new(self.root.join(OCCUPANCY_FILE))
    }

    #[must_use]
    pub fn ledger(&self) -> JsonFileStore<TransitionLedger> {
        JsonFileStore::new(self.root.join(LEDGER_FILE))
    }
}
