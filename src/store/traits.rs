use crate::model::Pokemon;
use crate::store::error::StoreError;

/// Durable storage of the record collection. Implementations must make each
/// load-mutate-save sequence exclusive so concurrent mutations cannot lose
/// updates.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the full collection from the backing file.
    async fn load(&self) -> Result<Vec<Pokemon>, StoreError>;

    /// Replace the full collection on disk.
    async fn save(&self, records: &[Pokemon]) -> Result<(), StoreError>;

    /// Load the collection, apply `op`, and write the result back, all
    /// under the store's write lock.
    async fn mutate<F, T>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<Pokemon>) -> T + Send,
        T: Send;

    /// Like [`RecordStore::mutate`], but a `None` from `op` leaves the
    /// file untouched.
    async fn try_mutate<F, T>(&self, op: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut Vec<Pokemon>) -> Option<T> + Send,
        T: Send;
}
