use super::record::VariantRecord;
use std::sync::{Arc, PoisonError, RwLock};

/// Loaded variant records in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<VariantRecord>,
}

impl Dataset {
    pub fn new(records: Vec<VariantRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn num_defaulted(&self) -> usize {
        self.records.iter().filter(|r| r.beta_defaulted).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
enum LoadState {
    Unloaded,
    Loading,
    Ready(Arc<Dataset>),
    Failed(String),
}

/// Holder of the process-wide dataset.
///
/// The dataset is published as a whole: readers obtain an `Arc` snapshot and
/// never see a partially loaded collection. A store moves through
/// `Unloaded -> Loading -> Ready | Failed` once and is never reloaded.
#[derive(Debug)]
pub struct DataStore {
    state: RwLock<LoadState>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LoadState::Unloaded),
        }
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            state: RwLock::new(LoadState::Ready(Arc::new(dataset))),
        }
    }

    /// Claims the single load of this store. Returns false if a load was
    /// already started.
    pub fn begin_load(&self) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, LoadState::Unloaded) {
            *state = LoadState::Loading;
            true
        } else {
            false
        }
    }

    pub fn install(&self, dataset: Dataset) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = LoadState::Ready(Arc::new(dataset));
    }

    pub fn fail(&self, reason: impl Into<String>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = LoadState::Failed(reason.into());
    }

    pub fn is_ready(&self) -> bool {
        self.status() == LoadStatus::Ready
    }

    pub fn status(&self) -> LoadStatus {
        match *self.state.read().unwrap_or_else(PoisonError::into_inner) {
            LoadState::Unloaded => LoadStatus::Unloaded,
            LoadState::Loading => LoadStatus::Loading,
            LoadState::Ready(_) => LoadStatus::Ready,
            LoadState::Failed(_) => LoadStatus::Failed,
        }
    }

    pub fn snapshot(&self) -> Option<Arc<Dataset>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            LoadState::Ready(dataset) => Some(Arc::clone(dataset)),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<String> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            LoadState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}
