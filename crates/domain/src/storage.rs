//! File storage port and its in-memory adapter.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier assigned to a stored file by the storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file as uploaded by the user, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Reference to a file held by the storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: FileId,
    pub url: String,
    pub file_name: String,
}

/// Errors returned by storage adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Failed to upload file {file_name}: {reason}")]
    UploadFailed { file_name: String, reason: String },

    #[error("Failed to delete file {id}: {reason}")]
    DeleteFailed { id: FileId, reason: String },
}

/// Where payment proof documents live.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores the file and returns its reference.
    async fn upload_file(&self, file: &FileUpload) -> Result<StoredFile, StorageError>;

    /// Removes a stored file.
    async fn delete_file(&self, id: &FileId) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
struct InMemoryStorageState {
    files: HashMap<FileId, FileUpload>,
    next_id: u32,
    fail_on_upload: bool,
    fail_on_delete: bool,
    uploads: usize,
    deletes: Vec<FileId>,
}

/// In-memory file storage for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStorage {
    state: Arc<RwLock<InMemoryStorageState>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following upload fail.
    pub fn set_fail_on_upload(&self, fail: bool) {
        self.state.write().unwrap().fail_on_upload = fail;
    }

    /// Makes every following delete fail.
    pub fn set_fail_on_delete(&self, fail: bool) {
        self.state.write().unwrap().fail_on_delete = fail;
    }

    /// Stores a file directly, bypassing the upload counter.
    pub fn seed(&self, id: FileId, file: FileUpload) -> StoredFile {
        let stored = StoredFile {
            url: file_url(&id),
            file_name: file.file_name.clone(),
            id: id.clone(),
        };
        self.state.write().unwrap().files.insert(id, file);
        stored
    }

    pub fn contains(&self, id: &FileId) -> bool {
        self.state.read().unwrap().files.contains_key(id)
    }

    pub fn file_count(&self) -> usize {
        self.state.read().unwrap().files.len()
    }

    /// Number of successful uploads.
    pub fn upload_count(&self) -> usize {
        self.state.read().unwrap().uploads
    }

    /// Ids passed to successful deletes, in call order.
    pub fn deleted(&self) -> Vec<FileId> {
        self.state.read().unwrap().deletes.clone()
    }
}

fn file_url(id: &FileId) -> String {
    format!("memory://files/{id}")
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn upload_file(&self, file: &FileUpload) -> Result<StoredFile, StorageError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_upload {
            return Err(StorageError::UploadFailed {
                file_name: file.file_name.clone(),
                reason: "storage rejected the upload".to_string(),
            });
        }

        state.next_id += 1;
        let id = FileId::new(format!("FILE-{:04}", state.next_id));
        state.files.insert(id.clone(), file.clone());
        state.uploads += 1;

        Ok(StoredFile {
            url: file_url(&id),
            file_name: file.file_name.clone(),
            id,
        })
    }

    async fn delete_file(&self, id: &FileId) -> Result<(), StorageError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_delete {
            return Err(StorageError::DeleteFailed {
                id: id.clone(),
                reason: "storage rejected the delete".to_string(),
            });
        }

        state.files.remove(id);
        state.deletes.push(id.clone());
        Ok(())
    }
}
