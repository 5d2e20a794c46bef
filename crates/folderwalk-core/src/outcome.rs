use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::summary::ColumnSummary;
use crate::traits::ExportedFile;
use crate::types::{FolderDataset, SessionDataset};

/// Both datasets of a completed harvest, before export.
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub folders: FolderDataset,
    pub sessions: SessionDataset,
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestOutcome {
    pub root_id: String,
    pub folders: usize,
    pub sessions: usize,
    pub folder_columns: Vec<ColumnSummary>,
    pub session_columns: Vec<ColumnSummary>,
    pub exported: Vec<ExportedFile>,
    pub total_duration_secs: f64,
}

impl HarvestOutcome {
    pub fn new(
        root_id: String,
        harvest: &Harvest,
        exported: Vec<ExportedFile>,
        duration: Duration,
    ) -> Self {
        Self {
            root_id,
            folders: harvest.folders.len(),
            sessions: harvest.sessions.len(),
            folder_columns: crate::summary::folder_columns(&harvest.folders),
            session_columns: crate::summary::session_columns(&harvest.sessions),
            exported,
            total_duration_secs: duration.as_secs_f64(),
        }
    }
}
