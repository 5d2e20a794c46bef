use tracing::debug;

use crate::error::RemoteAccessError;
use crate::traits::FolderService;
use crate::types::{FolderDataset, FolderNode};

/// Depth-first, pre-order enumeration of a remote folder tree.
pub struct FolderWalker<'a> {
    service: &'a dyn FolderService,
}

impl<'a> FolderWalker<'a> {
    pub fn new(service: &'a dyn FolderService) -> Self {
        Self { service }
    }

    /// Enumerate every folder below `root_id`, excluding the root itself.
    ///
    /// A folder is emitted before any of its descendants and siblings keep the
    /// order the service returned. Each call builds its own dataset. A failure
    /// listing any folder aborts the whole enumeration.
    ///
    /// The hierarchy must be acyclic; a cycle keeps this running forever.
    pub async fn enumerate_folders(&self, root_id: &str) -> Result<FolderDataset, RemoteAccessError> {
        let mut found = FolderDataset::new();
        // Pending folders, next to visit on top
        let mut pending: Vec<FolderNode> = Vec::new();

        self.push_children(root_id, &mut pending).await?;

        while let Some(folder) = pending.pop() {
            let folder_id = folder.id.clone();
            found.push(folder);
            self.push_children(&folder_id, &mut pending).await?;
        }

        Ok(found)
    }

    async fn push_children(
        &self,
        folder_id: &str,
        pending: &mut Vec<FolderNode>,
    ) -> Result<(), RemoteAccessError> {
        let children = self.service.list_child_folders(folder_id).await?;
        debug!(folder_id, children = children.len(), "Listed child folders");

        pending.extend(children.into_iter().rev().map(FolderNode::from_raw));
        Ok(())
    }
}
