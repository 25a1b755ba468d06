use std::sync::{Mutex, MutexGuard};

use crate::domain::model::collection::BookCollection;
use crate::domain::repository::BookRepository;

#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("lock poisoned")]
    Poisoned,
}

/// プロセス内メモリによるBookRepository実装。
/// 再起動で内容は失われる。
#[derive(Debug)]
pub struct InMemoryBookRepository {
    collection: Mutex<BookCollection>,
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new(BookCollection::seeded())
    }
}

impl InMemoryBookRepository {
    pub fn new(collection: BookCollection) -> Self {
        Self {
            collection: Mutex::new(collection),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BookCollection>, MemoryStoreError> {
        self.collection
            .lock()
            .map_err(|_| MemoryStoreError::Poisoned)
    }
}

impl BookRepository for InMemoryBookRepository {
    type Error = MemoryStoreError;

    fn read<T>(&self, f: impl FnOnce(&BookCollection) -> T) -> Result<T, Self::Error> {
        let guard = self.lock()?;
        Ok(f(&*guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut BookCollection) -> T) -> Result<T, Self::Error> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }
}
