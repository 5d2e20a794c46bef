use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a [`FolderService`](crate::FolderService).
#[derive(Error, Debug)]
pub enum RemoteAccessError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// A raw session lacks a field the flat row needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissingFieldError {
    #[error("missing field `{path}`")]
    Absent { path: &'static str },

    /// A segment above the leaf is `null` or a scalar.
    #[error("field `{path}` is not reachable: `{parent}` is not an object")]
    NotAnObject {
        path: &'static str,
        parent: &'static str,
    },
}

impl MissingFieldError {
    /// Dotted path of the offending field, e.g. `CreatedBy.Id`.
    pub fn path(&self) -> &'static str {
        match self {
            MissingFieldError::Absent { path } => path,
            MissingFieldError::NotAnObject { path, .. } => path,
        }
    }
}

/// Failure reported by an [`Exporter`](crate::Exporter).
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {dataset}: {message}")]
    Encode { dataset: String, message: String },
}

/// Any failure that aborts a harvest run.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Remote access error: {0}")]
    Remote(#[from] RemoteAccessError),

    #[error("Malformed session record: {0}")]
    MissingField(#[from] MissingFieldError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}
