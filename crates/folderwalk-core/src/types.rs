use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the synthetic top-level folder.
///
/// The remote service has no real folder at the top of the tree; it is
/// addressed with the all-zero GUID and reported as a null id or null parent.
pub const ROOT_FOLDER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// A folder as returned by the remote service, before normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFolder {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ParentFolder", default)]
    pub parent_folder: Option<RawFolderRef>,
}

/// Reference to another folder inside a raw folder record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFolderRef {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
}

/// A session exactly as the remote service returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSession(pub serde_json::Value);

impl From<serde_json::Value> for RawSession {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// One row of the folder dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: String,
    pub name: String,
    pub parent_id: String,
}

impl FolderNode {
    /// Normalize a raw folder, mapping null identifiers to [`ROOT_FOLDER_ID`].
    pub fn from_raw(raw: RawFolder) -> Self {
        let parent_id = raw
            .parent_folder
            .and_then(|parent| parent.id)
            .unwrap_or_else(|| ROOT_FOLDER_ID.to_string());

        Self {
            id: raw.id.unwrap_or_else(|| ROOT_FOLDER_ID.to_string()),
            name: raw.name,
            parent_id,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id == ROOT_FOLDER_ID
    }
}

/// One row of the session dataset.
///
/// Every cell is copied from the raw record as found; a `null` leaf is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: Option<String>,
    pub session_name: Option<String>,
    pub percent_completed: Option<Numeric>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub duration: Option<Numeric>,
    pub created_userid: Option<String>,
    pub created_username: Option<String>,
    pub folder_id: Option<String>,
    pub folder_name: Option<String>,
    pub viewer_url: Option<String>,
}

/// Value of a numeric column. A non-numeric leaf is kept as its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl fmt::Display for Numeric {
    /// Shortest decimal form for numbers: `100`, `12.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Number(n) => write!(f, "{}", n),
            Numeric::Text(s) => f.write_str(s),
        }
    }
}

/// Folders in pre-order visitation order.
pub type FolderDataset = Vec<FolderNode>;

/// Sessions in folder-visitation order.
pub type SessionDataset = Vec<SessionRecord>;
