//! In-memory pending registry.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::approval::{
    domain::{DecisionKind, PendingEntry, PendingSubmission, SubmissionId},
    ports::{PendingTaskRegistry, RegistryError, RegistryResult},
};

/// Thread-safe in-memory registry.
///
/// Claims and removals take the write lock, so racing decisions on one id
/// are serialized and only the first claim succeeds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPendingRegistry {
    state: Arc<RwLock<InMemoryRegistryState>>,
}

#[derive(Debug, Default)]
struct InMemoryRegistryState {
    entries: HashMap<SubmissionId, PendingEntry>,
    retired: HashSet<SubmissionId>,
}

impl InMemoryPendingRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: &impl std::fmt::Display) -> RegistryError {
    RegistryError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl PendingTaskRegistry for InMemoryPendingRegistry {
    async fn add(&self, submission: PendingSubmission) -> RegistryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let id = submission.id().clone();
        if state.retired.contains(&id) {
            return Err(RegistryError::Retired(id));
        }
        if state.entries.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }
        state.entries.insert(id, PendingEntry::submitted(submission));
        Ok(())
    }

    async fn get(&self, id: &SubmissionId) -> RegistryResult<Option<PendingEntry>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.entries.get(id).cloned())
    }

    async fn claim(
        &self,
        id: &SubmissionId,
        kind: DecisionKind,
    ) -> RegistryResult<Option<PendingEntry>> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let Some(entry) = state.entries.get_mut(id) else {
            return Ok(None);
        };
        Ok(entry.claim(kind).then(|| entry.clone()))
    }

    async fn remove(&self, id: &SubmissionId) -> RegistryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        if state.entries.remove(id).is_some() {
            state.retired.insert(id.clone());
        }
        Ok(())
    }

    async fn list(&self) -> RegistryResult<Vec<PendingEntry>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.entries.values().cloned().collect())
    }

    async fn len(&self) -> RegistryResult<usize> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.entries.len())
    }
}
