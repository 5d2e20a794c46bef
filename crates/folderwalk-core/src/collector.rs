use tracing::debug;

use crate::error::HarvestError;
use crate::flatten::flatten;
use crate::traits::FolderService;
use crate::types::{FolderNode, SessionRecord};

/// Pulls and flattens the sessions of one folder at a time.
pub struct SessionCollector<'a> {
    service: &'a dyn FolderService,
}

impl<'a> SessionCollector<'a> {
    pub fn new(service: &'a dyn FolderService) -> Self {
        Self { service }
    }

    /// Sessions of `folder` in the order the service returned them.
    ///
    /// Duplicates are kept. The first record that cannot be flattened fails the
    /// whole folder.
    pub async fn collect_sessions(
        &self,
        folder: &FolderNode,
    ) -> Result<Vec<SessionRecord>, HarvestError> {
        let raw_sessions = self.service.list_sessions(&folder.id).await?;

        let sessions = raw_sessions
            .iter()
            .map(flatten)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            folder_id = %folder.id,
            folder_name = %folder.name,
            count = sessions.len(),
            "Collected sessions"
        );

        Ok(sessions)
    }
}
