use std::{
    path::Path,
    sync::Arc,
    thread::{self, JoinHandle},
};

use crate::{
    domain::FinanceData,
    storage::{json_backend::data_warnings, save_data_to_path, DataSource},
};

use super::{
    cancel::CancelToken,
    errors::{FinanceError, Result},
    services::{reconcile_snapshot, ServiceResult},
};

/// Outcome of reading a document, before it is installed anywhere.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub data: FinanceData,
    pub warnings: Vec<String>,
    pub source: String,
}

/// Metadata describing an installed load.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    pub warnings: Vec<String>,
    pub source: String,
}

/// Reads and reconciles a document.
///
/// The token is checked before reading and again before handing the result
/// back, so a cancelled load never produces a snapshot.
pub fn load_snapshot(source: &dyn DataSource, token: &CancelToken) -> Result<LoadedSnapshot> {
    token.check()?;
    let origin = source.describe();
    tracing::debug!(source = %origin, "reading finance document");
    let raw = source.read()?;
    token.check()?;
    let warnings = data_warnings(&raw);
    let data = reconcile_snapshot(&raw);
    Ok(LoadedSnapshot {
        data,
        warnings,
        source: origin,
    })
}

/// Runs `load_snapshot` on a worker thread.
pub fn spawn_load(
    source: Arc<dyn DataSource>,
    token: CancelToken,
) -> JoinHandle<Result<LoadedSnapshot>> {
    thread::spawn(move || load_snapshot(source.as_ref(), &token))
}

/// Owns the session snapshot. Every mutation goes through [`FinanceStore::update`].
#[derive(Debug, Default)]
pub struct FinanceStore {
    current: Option<Arc<FinanceData>>,
    source: Option<String>,
}

impl FinanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn snapshot(&self) -> Result<Arc<FinanceData>> {
        self.current.clone().ok_or(FinanceError::NotLoaded)
    }

    pub fn load(&mut self, source: &dyn DataSource, token: &CancelToken) -> Result<LoadMetadata> {
        let loaded = load_snapshot(source, token)?;
        self.install(loaded, token)
    }

    /// Installs a snapshot produced elsewhere, e.g. by [`spawn_load`].
    ///
    /// A cancelled token discards the snapshot and leaves the store as it was.
    pub fn install(&mut self, loaded: LoadedSnapshot, token: &CancelToken) -> Result<LoadMetadata> {
        if token.is_cancelled() {
            tracing::info!(source = %loaded.source, "cancelled load discarded");
            return Err(FinanceError::Cancelled);
        }
        let LoadedSnapshot {
            data,
            warnings,
            source,
        } = loaded;
        tracing::info!(
            source = %source,
            transactions = data.transactions.len(),
            budgets = data.budgets.len(),
            pots = data.pots.len(),
            bills = data.recurring_bills.len(),
            "finance data loaded"
        );
        for warning in &warnings {
            tracing::warn!(source = %source, "{}", warning);
        }
        self.current = Some(Arc::new(data));
        self.source = Some(source.clone());
        Ok(LoadMetadata { warnings, source })
    }

    /// Replaces the snapshot wholesale, reconciling it first.
    pub fn replace(&mut self, data: FinanceData, source: impl Into<String>) {
        self.current = Some(Arc::new(reconcile_snapshot(&data)));
        self.source = Some(source.into());
    }

    /// Applies `f` to a copy of the snapshot and swaps the reconciled copy in.
    ///
    /// On error the installed snapshot is left as it was.
    pub fn update<T, F>(&mut self, f: F) -> ServiceResult<T>
    where
        F: FnOnce(&mut FinanceData) -> ServiceResult<T>,
    {
        let current = self.snapshot()?;
        let mut draft = FinanceData::clone(&current);
        let value = f(&mut draft)?;
        self.current = Some(Arc::new(reconcile_snapshot(&draft)));
        Ok(value)
    }

    /// Writes the session snapshot to `path`. The source document is never touched.
    pub fn export(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot()?;
        save_data_to_path(&snapshot, path)?;
        tracing::info!(path = %path.display(), "snapshot exported");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.source = None;
    }
}
