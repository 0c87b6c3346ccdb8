//! Advisory persistence of node positions per workflow type.
//!
//! Provides an abstraction over different storage backends:
//! - `MemPositionStore`: In-memory storage for tests and short sessions
//! - `FilePositionStore`: One JSON file per workflow type
//!
//! Losing stored positions only affects layout; the converter falls back
//! to the grid for any node without a saved position.

mod file;
mod mem;
mod persister;

use crate::{Result, convert::PositionMap};

pub use file::FilePositionStore;
pub use mem::MemPositionStore;
pub use persister::PositionPersister;

/// Namespaced storage key for one workflow type.
pub fn storage_key(
    prefix: &str,
    workflow_type: &str,
) -> String {
    format!("{}:{}", prefix, workflow_type)
}

/// Storage backend for node positions.
pub trait PositionStore: Send + Sync {
    /// Load saved positions, `None` when nothing was stored yet.
    fn load(
        &self,
        workflow_type: &str,
    ) -> Result<Option<PositionMap>>;

    /// Replace the saved positions of a workflow type.
    fn save(
        &self,
        workflow_type: &str,
        positions: &PositionMap,
    ) -> Result<()>;

    /// Forget the saved positions of a workflow type.
    fn remove(
        &self,
        workflow_type: &str,
    ) -> Result<()>;
}
