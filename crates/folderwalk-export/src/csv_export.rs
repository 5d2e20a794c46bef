use std::path::{Path, PathBuf};

use tracing::debug;

use folderwalk_core::summary::{FOLDER_COLUMNS, SESSION_COLUMNS};
use folderwalk_core::{
    ExportError, ExportedFile, Exporter, FolderDataset, FolderNode, Numeric, SessionDataset,
    SessionRecord,
};

pub const DEFAULT_FOLDERS_FILE: &str = "all_panopto_folders.csv";
pub const DEFAULT_SESSIONS_FILE: &str = "all_panopto_sessions.csv";

/// Writes one CSV file per dataset into an output directory
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
    folders_file: String,
    sessions_file: String,
}

impl CsvExporter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            folders_file: DEFAULT_FOLDERS_FILE.to_string(),
            sessions_file: DEFAULT_SESSIONS_FILE.to_string(),
        }
    }

    pub fn with_folders_file(mut self, name: impl Into<String>) -> Self {
        self.folders_file = name.into();
        self
    }

    pub fn with_sessions_file(mut self, name: impl Into<String>) -> Self {
        self.sessions_file = name.into();
        self
    }

    pub fn folders_path(&self) -> PathBuf {
        self.output_dir.join(&self.folders_file)
    }

    pub fn sessions_path(&self) -> PathBuf {
        self.output_dir.join(&self.sessions_file)
    }

    fn write_folders(&self, path: &Path, folders: &[FolderNode]) -> Result<(), ExportError> {
        let mut wtr = csv::Writer::from_path(path).map_err(|e| csv_error(path, "folders", e))?;

        wtr.write_record(FOLDER_COLUMNS)
            .map_err(|e| csv_error(path, "folders", e))?;
        for folder in folders {
            wtr.write_record([&folder.id, &folder.name, &folder.parent_id])
                .map_err(|e| csv_error(path, "folders", e))?;
        }

        wtr.flush().map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_sessions(&self, path: &Path, sessions: &[SessionRecord]) -> Result<(), ExportError> {
        let mut wtr = csv::Writer::from_path(path).map_err(|e| csv_error(path, "sessions", e))?;

        wtr.write_record(SESSION_COLUMNS)
            .map_err(|e| csv_error(path, "sessions", e))?;
        for session in sessions {
            wtr.write_record([
                cell(&session.session_name),
                cell(&session.session_id),
                format_number(&session.percent_completed).as_str(),
                cell(&session.description),
                cell(&session.start_time),
                format_number(&session.duration).as_str(),
                cell(&session.created_userid),
                cell(&session.created_username),
                cell(&session.folder_id),
                cell(&session.folder_name),
                cell(&session.viewer_url),
            ])
            .map_err(|e| csv_error(path, "sessions", e))?;
        }

        wtr.flush().map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Exporter for CsvExporter {
    fn export(
        &self,
        folders: &FolderDataset,
        sessions: &SessionDataset,
    ) -> Result<Vec<ExportedFile>, ExportError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let folders_path = self.folders_path();
        self.write_folders(&folders_path, folders)?;
        debug!(path = %folders_path.display(), rows = folders.len(), "Wrote folders");

        let sessions_path = self.sessions_path();
        self.write_sessions(&sessions_path, sessions)?;
        debug!(path = %sessions_path.display(), rows = sessions.len(), "Wrote sessions");

        Ok(vec![
            ExportedFile {
                dataset: "folders".to_string(),
                path: folders_path,
                rows: folders.len(),
            },
            ExportedFile {
                dataset: "sessions".to_string(),
                path: sessions_path,
                rows: sessions.len(),
            },
        ])
    }
}

fn csv_error(path: &Path, dataset: &str, error: csv::Error) -> ExportError {
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => ExportError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => ExportError::Encode {
            dataset: dataset.to_string(),
            message,
        },
    }
}

/// Null is written as an empty cell
fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Shortest decimal form: `100`, `12.5`; empty for null
fn format_number(value: &Option<Numeric>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn folder(id: &str, name: &str, parent_id: &str) -> FolderNode {
        FolderNode {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent_id.to_string(),
        }
    }

    fn lecture() -> SessionRecord {
        SessionRecord {
            session_id: Some("s1".to_string()),
            session_name: Some("Lecture 1, part \"A\"".to_string()),
            percent_completed: Some(Numeric::Number(100.0)),
            description: None,
            start_time: Some("2024-09-02T14:00:00Z".to_string()),
            duration: Some(Numeric::Number(12.5)),
            created_userid: Some("u1".to_string()),
            created_username: Some("alice".to_string()),
            folder_id: Some("f1".to_string()),
            folder_name: Some("Math".to_string()),
            viewer_url: Some("https://x/v/s1".to_string()),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(&Some(Numeric::Number(100.0))), "100");
        assert_eq!(format_number(&Some(Numeric::Number(12.5))), "12.5");
        assert_eq!(format_number(&Some(Numeric::Text("n/a".to_string()))), "n/a");
        assert_eq!(format_number(&None), "");
    }

    #[test]
    fn test_null_cells_written_empty() {
        let dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(dir.path().to_path_buf());
        let sparse = SessionRecord {
            session_id: Some("s2".to_string()),
            ..Default::default()
        };

        exporter.export(&Vec::new(), &vec![sparse]).unwrap();

        let sessions_csv = std::fs::read_to_string(exporter.sessions_path()).unwrap();
        let lines: Vec<&str> = sessions_csv.lines().collect();
        assert_eq!(lines[1], ",s2,,,,,,,,,");
    }

    #[test]
    fn test_export_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(dir.path().join("out"));

        let folders = vec![
            folder("f1", "Math", folderwalk_core::ROOT_FOLDER_ID),
            folder("f2", "Algebra", "f1"),
        ];
        let sessions = vec![lecture()];

        let exported = exporter.export(&folders, &sessions).unwrap();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0].rows, 2);
        assert_eq!(exported[1].rows, 1);

        let folders_csv = std::fs::read_to_string(exporter.folders_path()).unwrap();
        let lines: Vec<&str> = folders_csv.lines().collect();
        assert_eq!(lines[0], "folder_id,folder_name,parent_folder");
        assert_eq!(
            lines[1],
            format!("f1,Math,{}", folderwalk_core::ROOT_FOLDER_ID)
        );
        assert_eq!(lines[2], "f2,Algebra,f1");

        let sessions_csv = std::fs::read_to_string(exporter.sessions_path()).unwrap();
        let lines: Vec<&str> = sessions_csv.lines().collect();
        assert_eq!(lines[0], SESSION_COLUMNS.join(","));
        assert_eq!(
            lines[1],
            "\"Lecture 1, part \"\"A\"\"\",s1,100,,2024-09-02T14:00:00Z,12.5,u1,alice,f1,Math,https://x/v/s1"
        );
    }

    #[test]
    fn test_export_empty_datasets_writes_headers() {
        let dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(dir.path().to_path_buf())
            .with_folders_file("folders.csv")
            .with_sessions_file("sessions.csv");

        let exported = exporter.export(&Vec::new(), &Vec::new()).unwrap();
        assert_eq!(exported[0].path, dir.path().join("folders.csv"));
        assert_eq!(exported[1].rows, 0);

        let sessions_csv = std::fs::read_to_string(dir.path().join("sessions.csv")).unwrap();
        assert_eq!(sessions_csv.lines().count(), 1);
    }

    #[test]
    fn test_export_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let exporter = CsvExporter::new(blocker);
        let err = exporter.export(&Vec::new(), &Vec::new()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
