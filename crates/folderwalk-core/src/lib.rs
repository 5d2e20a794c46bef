//! # folderwalk-core
//!
//! Walks a remote folder hierarchy once per node and flattens the sessions
//! found in every folder into two tabular datasets.
//!
//! ## Key Types
//!
//! - [`FolderService`] - Remote source of folders and sessions
//! - [`FolderWalker`] - Pre-order enumeration of the folder tree
//! - [`SessionCollector`] - Per-folder session retrieval and flattening
//! - [`HarvestRunner`] - Walk, collect and export in sequence
//! - [`Exporter`] - Destination for the finished datasets

mod collector;
mod error;
mod flatten;
mod outcome;
mod runner;
pub mod summary;
mod traits;
mod types;
mod walker;

pub use collector::SessionCollector;
pub use error::{ExportError, HarvestError, MissingFieldError, RemoteAccessError};
pub use flatten::flatten;
pub use outcome::{Harvest, HarvestOutcome};
pub use runner::HarvestRunner;
pub use summary::ColumnSummary;
pub use traits::{ExportedFile, Exporter, FolderService};
pub use types::{
    FolderDataset, FolderNode, Numeric, RawFolder, RawFolderRef, RawSession, SessionDataset,
    SessionRecord, ROOT_FOLDER_ID,
};
pub use walker::FolderWalker;
