use super::*;
use std::io;
use std::path::PathBuf;
use tokio::fs;

/// Stores every file directly inside one directory.
pub struct LocalFileStorage {
    storage_path: PathBuf,
}

impl LocalFileStorage {
    /// Creates the directory if it does not exist yet.
    pub fn new(storage_path: PathBuf) -> io::Result<Self> {
        std::fs::create_dir_all(&storage_path)?;
        Ok(Self { storage_path })
    }

    // Hidden and without an image extension, so listings never pick it up.
    fn temp_path(&self, file_name: &str) -> PathBuf {
        self.storage_path.join(format!(".{file_name}.tmp"))
    }
}

#[async_trait]
impl Storage for LocalFileStorage {
    async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        if !is_plain_file_name(file_name) {
            return Err(ApiError::SaveFailed(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid file name {file_name:?}"),
            )));
        }

        let file_path = self.storage_path.join(file_name);
        let temp_path = self.temp_path(file_name);

        let written = match fs::write(&temp_path, bytes).await {
            Ok(()) => fs::rename(&temp_path, &file_path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(ApiError::SaveFailed(e));
        }

        Ok(())
    }

    async fn get(&self, file_name: &str) -> Result<(Vec<u8>, Mime), ApiError> {
        if !is_plain_file_name(file_name) {
            return Err(ApiError::NotFound);
        }

        let file_path = self.storage_path.join(file_name);

        let metadata = match fs::metadata(&file_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ApiError::NotFound),
            Err(e) => return Err(ApiError::ReadFailed(e)),
        };
        if !metadata.is_file() {
            return Err(ApiError::NotFound);
        }

        let bytes = fs::read(&file_path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApiError::NotFound,
            _ => ApiError::ReadFailed(e),
        })?;

        Ok((bytes, content_type_for(file_name)))
    }

    async fn list(&self) -> Result<Vec<String>, ApiError> {
        let mut entries = fs::read_dir(&self.storage_path)
            .await
            .map_err(ApiError::ListFailed)?;

        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(ApiError::ListFailed)? {
            match entry.file_name().into_string() {
                Ok(file_name) => files.push(file_name),
                Err(raw) => tracing::warn!(file_name = ?raw, "skipping non-UTF-8 file name"),
            }
        }

        Ok(files)
    }
}
