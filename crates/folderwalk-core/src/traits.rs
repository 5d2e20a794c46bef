use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ExportError, RemoteAccessError};
use crate::types::{FolderDataset, RawFolder, RawSession, SessionDataset};

/// Remote source of the folder hierarchy and its sessions.
///
/// Implementations own transport, authentication and pagination; callers only
/// ever see fully materialized, ordered results.
#[async_trait]
pub trait FolderService: Send + Sync {
    /// Direct children of `folder_id`, in the order the service returns them.
    /// An empty list means the folder has no children.
    async fn list_child_folders(&self, folder_id: &str)
        -> Result<Vec<RawFolder>, RemoteAccessError>;

    /// Every session in `folder_id`, across all pages.
    async fn list_sessions(&self, folder_id: &str) -> Result<Vec<RawSession>, RemoteAccessError>;
}

/// A file written by an [`Exporter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedFile {
    /// Dataset name, `folders` or `sessions`
    pub dataset: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// Receives the finished datasets of a run.
pub trait Exporter: Send + Sync {
    fn export(
        &self,
        folders: &FolderDataset,
        sessions: &SessionDataset,
    ) -> Result<Vec<ExportedFile>, ExportError>;
}
