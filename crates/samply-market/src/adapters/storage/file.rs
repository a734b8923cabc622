use crate::domain::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File-backed key-value store.
///
/// Keeps the whole map in memory and rewrites it to disk as one JSON object
/// after every mutation. Writes go through a temp file and a rename, so a
/// crash leaves either the old or the new file, never a torn one.
pub struct FileBackedKVStore {
    data: BTreeMap<String, String>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();
        let data = Self::load_from_file(&path)?;

        if data.is_empty() {
            tracing::info!("[samply] 📁 No existing data at {}", path.display());
        } else {
            tracing::info!(
                "[samply] 💾 Loaded {} keys from {}",
                data.len(),
                path.display()
            );
        }

        Ok(Self { data, path })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_file(path: &Path) -> Result<BTreeMap<String, String>, KVStoreError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(KVStoreError::IOError {
                    message: e.to_string(),
                })
            }
        };
        if bytes.is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| KVStoreError::Corrupted {
            message: format!("{}: {}", path.display(), e),
        })
    }

    fn save_to_file(&self, data: &BTreeMap<String, String>) -> Result<(), KVStoreError> {
        use std::io::Write;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(data).map_err(|e| KVStoreError::IOError {
            message: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        Ok(())
    }

    /// Persist `next` and adopt it only once it is on disk.
    fn commit(&mut self, next: BTreeMap<String, String>) -> Result<(), KVStoreError> {
        self.save_to_file(&next)?;
        self.data = next;
        Ok(())
    }
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &str) -> Result<Option<String>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        next.insert(key.to_string(), value.to_string());
        self.commit(next)
    }

    fn delete(&mut self, key: &str) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        next.remove(key);
        self.commit(next)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    next.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    next.remove(&key);
                }
            }
        }
        self.commit(next)
    }

    fn exists(&self, key: &str) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}
