use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::model::Pokemon;
use crate::store::error::StoreError;
use crate::store::traits::RecordStore;

/// Collection store backed by a single JSON array file.
///
/// The file is the sole source of truth: every operation re-reads it, and
/// every mutation rewrites it whole. Writes go to a sibling temp file that is
/// renamed over the target, so readers never observe a torn write. A mutex
/// serializes load-mutate-save sequences; it is never held across an await.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<Pokemon>, StoreError> {
        let bytes = fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write_records(&self, records: &[Pokemon]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }
        log::debug!("wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Pokemon>, StoreError> {
        let _guard = self.write_lock.lock();
        self.read_records()
    }

    async fn save(&self, records: &[Pokemon]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        self.write_records(records)
    }

    async fn mutate<F, T>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<Pokemon>) -> T + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock();
        let mut records = self.read_records()?;
        let out = op(&mut records);
        self.write_records(&records)?;
        Ok(out)
    }

    async fn try_mutate<F, T>(&self, op: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut Vec<Pokemon>) -> Option<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock();
        let mut records = self.read_records()?;
        match op(&mut records) {
            Some(out) => {
                self.write_records(&records)?;
                Ok(Some(out))
            }
            None => Ok(None),
        }
    }
}
