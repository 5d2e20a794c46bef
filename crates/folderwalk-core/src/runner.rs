use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use folderwalk_logging::{LogEvent, Logger};

use crate::collector::SessionCollector;
use crate::error::HarvestError;
use crate::outcome::{Harvest, HarvestOutcome};
use crate::traits::{Exporter, FolderService};
use crate::types::{SessionDataset, ROOT_FOLDER_ID};
use crate::walker::FolderWalker;

/// Sequences folder enumeration, session collection and export
pub struct HarvestRunner<'a> {
    service: &'a dyn FolderService,
    exporter: &'a dyn Exporter,
    logger: Arc<Logger>,
    root_id: String,
}

impl<'a> HarvestRunner<'a> {
    pub fn new(
        service: &'a dyn FolderService,
        exporter: &'a dyn Exporter,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            service,
            exporter,
            logger,
            root_id: ROOT_FOLDER_ID.to_string(),
        }
    }

    /// Start the walk below a folder other than the top level
    pub fn with_root(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = root_id.into();
        self
    }

    /// Harvest everything and hand it to the exporter.
    ///
    /// Any error aborts the run before export; nothing collected so far is kept.
    pub async fn run(&self) -> Result<HarvestOutcome, HarvestError> {
        match self.run_to_export().await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(error = %e, "Harvest aborted");
                self.logger.log(&LogEvent::ErrorEncountered {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn run_to_export(&self) -> Result<HarvestOutcome, HarvestError> {
        let started_at = Instant::now();
        let harvest = self.harvest().await?;

        let exported = self.exporter.export(&harvest.folders, &harvest.sessions)?;
        for file in &exported {
            self.logger.log(&LogEvent::DatasetExported {
                dataset: file.dataset.clone(),
                path: file.path.clone(),
                rows: file.rows,
            });
        }

        let duration = started_at.elapsed();
        self.logger.log(&LogEvent::HarvestCompleted {
            folders: harvest.folders.len(),
            sessions: harvest.sessions.len(),
            duration_secs: duration.as_secs_f64(),
        });

        Ok(HarvestOutcome::new(
            self.root_id.clone(),
            &harvest,
            exported,
            duration,
        ))
    }

    /// Enumerate all folders, then collect the sessions of each in order.
    pub async fn harvest(&self) -> Result<Harvest, HarvestError> {
        self.logger.log(&LogEvent::HarvestStarted {
            root_id: self.root_id.clone(),
        });

        let walk_started = Instant::now();
        let folders = FolderWalker::new(self.service)
            .enumerate_folders(&self.root_id)
            .await?;
        info!(count = folders.len(), "Folders enumerated");
        self.logger.log(&LogEvent::FoldersEnumerated {
            count: folders.len(),
            duration_secs: walk_started.elapsed().as_secs_f64(),
        });

        let collector = SessionCollector::new(self.service);
        let mut sessions = SessionDataset::new();
        for (index, folder) in folders.iter().enumerate() {
            let batch = collector.collect_sessions(folder).await?;
            self.logger.log(&LogEvent::FolderSessionsCollected {
                index,
                total: folders.len(),
                folder_id: folder.id.clone(),
                folder_name: folder.name.clone(),
                count: batch.len(),
            });
            sessions.extend(batch);
        }
        info!(count = sessions.len(), "Sessions collected");
        self.logger.log(&LogEvent::SessionsCollected {
            count: sessions.len(),
        });

        Ok(Harvest { folders, sessions })
    }
}
