use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};

use super::error::{StoreError, StoreResult};

/// A JSON array of `T` kept in a single file.
///
/// Every read and every read-modify-write goes through the same mutex, so two
/// mutations on one collection can never interleave between load and save.
/// Nothing is cached: each call reloads the file.
#[derive(Debug)]
pub struct DocumentFile<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DocumentFile<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file holding `[]` if it is missing. Existing files are left alone.
    pub async fn ensure_exists(&self) -> StoreResult<()> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if exists {
            return Ok(());
        }

        self.create_parent_dir().await?;
        fs::write(&self.path, b"[]")
            .await
            .map_err(|source| self.io_error(source))?;
        tracing::info!(path = %self.path.display(), "created empty collection file");
        Ok(())
    }

    pub async fn load(&self) -> StoreResult<Vec<T>> {
        self.ensure_exists().await?;
        let bytes = fs::read(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        let items: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), count = items.len(), "loaded collection");
        Ok(items)
    }

    /// Replaces the whole file with `items`.
    ///
    /// The array is written to a sibling `.tmp` file first and renamed over the
    /// target, so a crash mid-write leaves the previous contents intact.
    pub async fn save(&self, items: &[T]) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(items)?;
        let tmp_path = self.path.with_extension("tmp");

        self.create_parent_dir().await?;

        fs::write(&tmp_path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp_path.clone(),
                source,
            })?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        tracing::debug!(path = %self.path.display(), count = items.len(), "saved collection");
        Ok(())
    }

    /// Runs a query against a freshly loaded snapshot. Nothing is written.
    pub async fn read<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(Vec<T>) -> StoreResult<R> + Send,
    {
        let _guard = self.lock.lock().await;
        let items = self.load().await?;
        f(items)
    }

    /// Loads, applies `f`, and saves the collection back if `f` succeeded.
    ///
    /// The collection lock is held for the whole sequence.
    pub async fn update<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> StoreResult<R> + Send,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        let result = f(&mut items)?;
        self.save(&items).await?;
        Ok(result)
    }

    async fn create_parent_dir(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
