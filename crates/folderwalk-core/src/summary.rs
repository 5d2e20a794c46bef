//! Per-column fill counts for the tabular datasets.

use serde::{Deserialize, Serialize};

use crate::types::{FolderNode, SessionRecord};

/// Export column order of the folder dataset.
pub const FOLDER_COLUMNS: [&str; 3] = ["folder_id", "folder_name", "parent_folder"];

/// Export column order of the session dataset.
pub const SESSION_COLUMNS: [&str; 11] = [
    "session_name",
    "session_id",
    "percent_completed",
    "description",
    "start_time",
    "duration",
    "created_userid",
    "created_username",
    "folder_id",
    "folder_name",
    "viewer_url",
];

/// How many rows hold a non-null value in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    pub non_null: usize,
}

/// Folder cells are never null: identifiers are normalized on the way in.
pub fn folder_columns(folders: &[FolderNode]) -> Vec<ColumnSummary> {
    zip_columns(&FOLDER_COLUMNS, &[folders.len(); 3])
}

pub fn session_columns(sessions: &[SessionRecord]) -> Vec<ColumnSummary> {
    let present = |f: fn(&SessionRecord) -> bool| sessions.iter().filter(|&s| f(s)).count();

    let counts = [
        present(|s| s.session_name.is_some()),
        present(|s| s.session_id.is_some()),
        present(|s| s.percent_completed.is_some()),
        present(|s| s.description.is_some()),
        present(|s| s.start_time.is_some()),
        present(|s| s.duration.is_some()),
        present(|s| s.created_userid.is_some()),
        present(|s| s.created_username.is_some()),
        present(|s| s.folder_id.is_some()),
        present(|s| s.folder_name.is_some()),
        present(|s| s.viewer_url.is_some()),
    ];
    zip_columns(&SESSION_COLUMNS, &counts)
}

fn zip_columns(names: &[&str], counts: &[usize]) -> Vec<ColumnSummary> {
    names
        .iter()
        .zip(counts)
        .map(|(name, count)| ColumnSummary {
            column: name.to_string(),
            non_null: *count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Numeric;

    fn session(id: &str, description: Option<&str>) -> SessionRecord {
        SessionRecord {
            session_id: Some(id.to_string()),
            session_name: Some(format!("Session {}", id)),
            percent_completed: Some(Numeric::Number(100.0)),
            description: description.map(String::from),
            start_time: None,
            duration: Some(Numeric::Number(60.0)),
            created_userid: Some("u1".to_string()),
            created_username: Some("alice".to_string()),
            folder_id: Some("f1".to_string()),
            folder_name: Some("Math".to_string()),
            viewer_url: Some(format!("https://x/v/{}", id)),
        }
    }

    #[test]
    fn test_session_columns_count_non_null_values() {
        let sessions = vec![
            session("s1", Some("intro")),
            session("s2", None),
            session("s3", Some("")),
        ];

        let summary = session_columns(&sessions);
        assert_eq!(summary.len(), SESSION_COLUMNS.len());
        assert_eq!(summary[0].column, "session_name");
        assert_eq!(summary[0].non_null, 3);

        // An empty string is a value; only null is missing
        let description = summary.iter().find(|c| c.column == "description").unwrap();
        assert_eq!(description.non_null, 2);

        let start_time = summary.iter().find(|c| c.column == "start_time").unwrap();
        assert_eq!(start_time.non_null, 0);
    }

    #[test]
    fn test_folder_columns_count_every_row() {
        let folders = vec![
            FolderNode {
                id: "f1".to_string(),
                name: String::new(),
                parent_id: crate::ROOT_FOLDER_ID.to_string(),
            },
            FolderNode {
                id: "f2".to_string(),
                name: "Algebra".to_string(),
                parent_id: "f1".to_string(),
            },
        ];

        let summary = folder_columns(&folders);
        assert!(summary.iter().all(|c| c.non_null == 2));
    }

    #[test]
    fn test_folder_columns_on_empty_dataset() {
        let summary = folder_columns(&[]);
        assert_eq!(
            summary.iter().map(|c| c.column.as_str()).collect::<Vec<_>>(),
            FOLDER_COLUMNS.to_vec()
        );
        assert!(summary.iter().all(|c| c.non_null == 0));
    }
}
