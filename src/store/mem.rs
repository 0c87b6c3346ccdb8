use crate::{Result, common::MemCache, convert::PositionMap};

use super::{PositionStore, storage_key};

/// Maximum number of workflow layouts kept in memory.
const POSITION_CACHE_SIZE: usize = 256;

/// In-memory position store backed by a moka cache.
#[derive(Clone)]
pub struct MemPositionStore {
    prefix: String,
    cache: MemCache<String, PositionMap>,
}

impl MemPositionStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            cache: MemCache::new(POSITION_CACHE_SIZE),
        }
    }
}

impl Default for MemPositionStore {
    fn default() -> Self {
        Self::new("workflow-positions")
    }
}

impl PositionStore for MemPositionStore {
    fn load(
        &self,
        workflow_type: &str,
    ) -> Result<Option<PositionMap>> {
        Ok(self.cache.get(&storage_key(&self.prefix, workflow_type)))
    }

    fn save(
        &self,
        workflow_type: &str,
        positions: &PositionMap,
    ) -> Result<()> {
        self.cache.set(storage_key(&self.prefix, workflow_type), positions.clone());
        Ok(())
    }

    fn remove(
        &self,
        workflow_type: &str,
    ) -> Result<()> {
        self.cache.remove(&storage_key(&self.prefix, workflow_type));
        Ok(())
    }
}
