//! Debounced position writes.
//!
//! Dragging a node fires many position updates. The persister keeps at
//! most one pending write per workflow type: each new update aborts the
//! pending write and restarts the delay, so only the last layout of a
//! burst reaches the store.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{trace, warn};

use crate::{Result, StepflowError, convert::PositionMap};

use super::PositionStore;

pub struct PositionPersister {
    store: Arc<dyn PositionStore>,
    delay: Duration,
    runtime: Handle,
    pending: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl PositionPersister {
    pub fn new(
        store: Arc<dyn PositionStore>,
        delay: Duration,
        runtime: Handle,
    ) -> Self {
        Self {
            store,
            delay,
            runtime,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Create a persister on the tokio runtime of the calling context.
    pub fn from_current(
        store: Arc<dyn PositionStore>,
        delay: Duration,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| StepflowError::Runtime(format!("position persister needs a tokio runtime: {}", e)))?;
        Ok(Self::new(store, delay, runtime))
    }

    pub fn store(&self) -> &Arc<dyn PositionStore> {
        &self.store
    }

    /// Schedule a write, replacing any write still pending for this type.
    pub fn schedule(
        &self,
        workflow_type: &str,
        positions: PositionMap,
    ) {
        let store = self.store.clone();
        let delay = self.delay;
        let key = workflow_type.to_string();

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(workflow_type = %key, nodes = positions.len(), "writing node positions");
            if let Err(e) = store.save(&key, &positions) {
                warn!(workflow_type = %key, error = %e, "failed to save node positions");
            }
        });

        if let Some(previous) = self.pending().insert(workflow_type.to_string(), task) {
            previous.abort();
        }
    }

    /// Whether a write for this type is still waiting or running.
    pub fn has_pending(
        &self,
        workflow_type: &str,
    ) -> bool {
        self.pending().get(workflow_type).is_some_and(|task| !task.is_finished())
    }

    /// Abort the pending write for one type.
    pub fn cancel(
        &self,
        workflow_type: &str,
    ) {
        if let Some(task) = self.pending().remove(workflow_type) {
            task.abort();
        }
    }

    /// Abort every pending write.
    pub fn cancel_all(&self) {
        for (_, task) in self.pending().drain() {
            task.abort();
        }
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<String, JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for PositionPersister {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
