use async_trait::async_trait;
use flock_core::{CoordinationStore, FlockError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-backed coordination store.
///
/// Each record path maps to one file under the data directory, so the
/// topology record survives daemon restarts and can be read by other
/// processes on the same host. Writes go through a temp file and a rename
/// so readers never observe a partial record.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    /// Create a store rooted at `data_dir`, creating the directory if
    /// needed.
    pub async fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();

        if !data_dir.exists() {
            fs::create_dir_all(data_dir).await.map_err(|e| {
                FlockError::coordination(format!("failed to create data directory: {e}"))
            })?;
        }

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Map a record path like `/flock/nodes` to a file under the data
    /// directory.
    fn file_for(&self, path: &str) -> PathBuf {
        let relative = path.trim_start_matches('/').replace('/', "_");
        self.data_dir.join(relative)
    }
}

#[async_trait]
impl CoordinationStore for FileSystemStore {
    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.file_for(path).exists())
    }

    async fn create(&self, path: &str, data: &[u8]) -> Result<()> {
        let file = self.file_for(path);
        if file.exists() {
            return Err(FlockError::coordination(format!(
                "record already exists at {path}"
            )));
        }
        write_atomic(&file, data).await
    }

    async fn set(&self, path: &str, data: &[u8]) -> Result<()> {
        let file = self.file_for(path);
        if !file.exists() {
            return Err(FlockError::coordination(format!("no record at {path}")));
        }
        write_atomic(&file, data).await
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let file = self.file_for(path);
        match fs::read(&file).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FlockError::coordination(format!("no record at {path}")))
            }
            Err(e) => Err(FlockError::coordination(format!(
                "failed to read record at {path}: {e}"
            ))),
        }
    }
}

async fn write_atomic(file: &Path, data: &[u8]) -> Result<()> {
    let temp = file.with_extension("tmp");

    fs::write(&temp, data)
        .await
        .map_err(|e| FlockError::coordination(format!("failed to write record: {e}")))?;

    fs::rename(&temp, file)
        .await
        .map_err(|e| FlockError::coordination(format!("failed to replace record: {e}")))?;

    Ok(())
}
