//! Loading and saving the record collection.
//!
//! The collection is always read and written as a whole. Handlers get the
//! store from the application state as a [RecordStore] trait object, so tests
//! can swap the data file for an [InMemoryStore].

use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde_json::Value;

use crate::{
    Error,
    record::{Record, records_from_values},
};

/// Loads and saves the full record collection.
pub trait RecordStore: Debug + Send + Sync {
    /// Load every record, in stored order.
    fn load(&self) -> Result<Vec<Record>, Error>;

    /// Replace the stored collection with `records`.
    fn save(&self, records: &[Record]) -> Result<(), Error>;
}

/// Stores the collection as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file does not need to exist until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    /// Load the records from the data file.
    ///
    /// A missing, unreadable or corrupt file is treated as an empty collection.
    /// Entries that are not records are skipped.
    fn load(&self) -> Result<Vec<Record>, Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(
                    "could not read {}, treating it as empty: {error}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<Value>>(&text) {
            Ok(values) => Ok(records_from_values(values)),
            Err(error) => {
                tracing::warn!(
                    "could not parse {}, treating it as empty: {error}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, records: &[Record]) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(records)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        fs::write(&self.path, text)
            .inspect_err(|error| {
                tracing::error!("could not write to {}: {error}", self.path.display())
            })
            .map_err(|error| Error::WriteFailed {
                path: self.path.display().to_string(),
                reason: error.to_string(),
            })?;

        tracing::info!("saved {} records to {}", records.len(), self.path.display());

        Ok(())
    }
}

/// Keeps the collection in memory. Useful for tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<Record>>,
}

impl InMemoryStore {
    /// Create a store holding `records`.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl RecordStore for InMemoryStore {
    fn load(&self) -> Result<Vec<Record>, Error> {
        self.records
            .lock()
            .map(|records| records.clone())
            .inspect_err(|error| tracing::error!("could not acquire record store lock: {error}"))
            .map_err(|_| Error::StoreLockError)
    }

    fn save(&self, records: &[Record]) -> Result<(), Error> {
        let mut stored = self
            .records
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire record store lock: {error}"))
            .map_err(|_| Error::StoreLockError)?;

        *stored = records.to_vec();

        Ok(())
    }
}

/// Load the collection and run `compute` over it on the blocking thread pool.
///
/// `part` names the work in the error returned if the task panics.
pub(crate) async fn load_and_compute<T, F>(
    store: &Arc<dyn RecordStore>,
    part: &'static str,
    compute: F,
) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce(Vec<Record>) -> T + Send + 'static,
{
    let store = Arc::clone(store);

    tokio::task::spawn_blocking(move || store.load().map(compute))
        .await
        .map_err(|join_error| Error::TaskFailed(part, join_error.to_string()))?
}

/// Replace the stored collection on the blocking thread pool.
pub(crate) async fn save_records(
    store: &Arc<dyn RecordStore>,
    records: Vec<Record>,
) -> Result<(), Error> {
    let store = Arc::clone(store);

    tokio::task::spawn_blocking(move || store.save(&records))
        .await
        .map_err(|join_error| Error::TaskFailed("save", join_error.to_string()))?
}
