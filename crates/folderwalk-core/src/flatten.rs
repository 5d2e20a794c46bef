use serde_json::Value;

use crate::error::MissingFieldError;
use crate::types::{Numeric, RawSession, SessionRecord};

/// Project a nested raw session into a flat row.
///
/// Every path must be present in the raw record, and every segment above a
/// leaf must be an object. Leaves are copied as found: `null` becomes `None`
/// and a value of an unexpected type is carried through as its text.
pub fn flatten(raw: &RawSession) -> Result<SessionRecord, MissingFieldError> {
    let record = &raw.0;

    Ok(SessionRecord {
        session_id: text(record, "Id")?,
        session_name: text(record, "Name")?,
        percent_completed: numeric(record, "PercentCompleted")?,
        description: text(record, "Description")?,
        start_time: text(record, "StartTime")?,
        duration: numeric(record, "Duration")?,
        created_userid: text(record, "CreatedBy.Id")?,
        created_username: text(record, "CreatedBy.Username")?,
        folder_id: text(record, "FolderDetails.Id")?,
        folder_name: text(record, "FolderDetails.Name")?,
        viewer_url: text(record, "Urls.ViewerUrl")?,
    })
}

/// Walk a dotted path. Intermediate segments must be objects.
fn lookup<'a>(record: &'a Value, path: &'static str) -> Result<&'a Value, MissingFieldError> {
    let mut current = record;
    let mut offset: usize = 0;
    for segment in path.split('.') {
        let object = current
            .as_object()
            .ok_or(MissingFieldError::NotAnObject {
                path,
                parent: &path[..offset.saturating_sub(1)],
            })?;
        current = object
            .get(segment)
            .ok_or(MissingFieldError::Absent { path })?;
        offset += segment.len() + 1;
    }
    Ok(current)
}

fn text(record: &Value, path: &'static str) -> Result<Option<String>, MissingFieldError> {
    Ok(match lookup(record, path)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}

fn numeric(record: &Value, path: &'static str) -> Result<Option<Numeric>, MissingFieldError> {
    Ok(match lookup(record, path)? {
        Value::Null => None,
        Value::Number(n) => Some(
            n.as_f64()
                .map(Numeric::Number)
                .unwrap_or_else(|| Numeric::Text(n.to_string())),
        ),
        Value::String(s) => Some(Numeric::Text(s.clone())),
        other => Some(Numeric::Text(other.to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lecture() -> Value {
        json!({
            "Id": "s1",
            "Name": "Lecture 1",
            "PercentCompleted": 100,
            "Description": null,
            "StartTime": "2024-09-02T14:00:00Z",
            "Duration": 3012.5,
            "CreatedBy": {"Id": "u1", "Username": "alice"},
            "FolderDetails": {"Id": "f1", "Name": "Math"},
            "Urls": {"ViewerUrl": "https://x/v/s1", "EmbedUrl": "https://x/e/s1"}
        })
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_flatten_projects_all_fields() {
        let record = flatten(&RawSession(lecture())).unwrap();

        assert_eq!(
            record,
            SessionRecord {
                session_id: some("s1"),
                session_name: some("Lecture 1"),
                percent_completed: Some(Numeric::Number(100.0)),
                description: None,
                start_time: some("2024-09-02T14:00:00Z"),
                duration: Some(Numeric::Number(3012.5)),
                created_userid: some("u1"),
                created_username: some("alice"),
                folder_id: some("f1"),
                folder_name: some("Math"),
                viewer_url: some("https://x/v/s1"),
            }
        );
    }

    #[test]
    fn test_flatten_missing_created_by() {
        let mut raw = lecture();
        raw.as_object_mut().unwrap().remove("CreatedBy");

        let err = flatten(&RawSession(raw)).unwrap_err();
        assert_eq!(err, MissingFieldError::Absent { path: "CreatedBy.Id" });
        assert_eq!(err.to_string(), "missing field `CreatedBy.Id`");
    }

    #[test]
    fn test_flatten_missing_nullable_field_is_still_an_error() {
        let mut raw = lecture();
        raw.as_object_mut().unwrap().remove("Description");

        let err = flatten(&RawSession(raw)).unwrap_err();
        assert_eq!(err.path(), "Description");
    }

    #[test]
    fn test_flatten_null_parent_object() {
        let mut raw = lecture();
        raw["FolderDetails"] = Value::Null;

        let err = flatten(&RawSession(raw)).unwrap_err();
        assert_eq!(
            err,
            MissingFieldError::NotAnObject {
                path: "FolderDetails.Id",
                parent: "FolderDetails",
            }
        );
    }

    #[test]
    fn test_flatten_null_leaves_become_empty() {
        let mut raw = lecture();
        raw["Id"] = Value::Null;
        raw["Name"] = Value::Null;
        raw["CreatedBy"]["Id"] = Value::Null;
        raw["FolderDetails"] = json!({"Id": null, "Name": null});

        let record = flatten(&RawSession(raw)).unwrap();
        assert_eq!(record.session_id, None);
        assert_eq!(record.session_name, None);
        assert_eq!(record.created_userid, None);
        assert_eq!(record.created_username, some("alice"));
        assert_eq!(record.folder_id, None);
        assert_eq!(record.folder_name, None);
        assert_eq!(record.viewer_url, some("https://x/v/s1"));
    }

    #[test]
    fn test_flatten_keeps_session_folder_membership() {
        let mut raw = lecture();
        raw["FolderDetails"] = json!({"Id": "f9", "Name": "Archive"});

        let record = flatten(&RawSession(raw)).unwrap();
        assert_eq!(record.folder_id, some("f9"));
        assert_eq!(record.folder_name, some("Archive"));
    }

    #[test]
    fn test_flatten_carries_unexpected_scalars_through() {
        let mut raw = lecture();
        raw["Duration"] = json!("3012");
        raw["CreatedBy"]["Id"] = json!(42);
        raw["Description"] = json!(true);

        let record = flatten(&RawSession(raw)).unwrap();
        assert_eq!(record.duration, Some(Numeric::Text("3012".to_string())));
        assert_eq!(record.created_userid, some("42"));
        assert_eq!(record.description, some("true"));
    }
}
