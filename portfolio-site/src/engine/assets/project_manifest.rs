use bevy::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use super::project::Project;
use crate::error::SiteError;

/// Decoded `projects.json`. Loaded once per session through the asset server.
///
/// Accepts the current `{"project_list": [...]}` envelope and the earlier bare
/// array. Entries are decoded one at a time so a bad project is reported by
/// position and id.
#[derive(Asset, TypePath, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ProjectManifest {
    pub project_list: Vec<Project>,
}

impl TryFrom<Value> for ProjectManifest {
    type Error = SiteError;

    fn try_from(document: Value) -> Result<Self, Self::Error> {
        let entries = match document {
            Value::Object(mut envelope) => match envelope.remove("project_list") {
                Some(Value::Array(entries)) => entries,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(SiteError::Manifest(format!(
                        "project_list must be an array, found {}",
                        json_kind(&other)
                    )));
                }
            },
            Value::Array(entries) => entries,
            other => {
                return Err(SiteError::Manifest(format!(
                    "expected an object or array, found {}",
                    json_kind(&other)
                )));
            }
        };

        let project_list = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| decode_project(index, entry))
            .collect::<Result<_, _>>()?;
        Ok(Self { project_list })
    }
}

fn decode_project(index: usize, entry: Value) -> Result<Project, SiteError> {
    let id = entry
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_owned);
    serde_json::from_value(entry).map_err(|e| {
        SiteError::Manifest(match id {
            Some(id) => format!("project {index} ('{id}'): {e}"),
            None => format!("project {index}: {e}"),
        })
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"{
        "id": "a",
        "title": "A",
        "category": "work",
        "thumbnail": {"type": "image", "path": "a.jpg"}
    }"#;

    #[test]
    fn accepts_envelope_and_bare_array() {
        let envelope: ProjectManifest =
            serde_json::from_str(&format!(r#"{{"project_list": [{PROJECT}]}}"#)).unwrap();
        let bare: ProjectManifest = serde_json::from_str(&format!("[{PROJECT}]")).unwrap();

        assert_eq!(envelope.project_list.len(), 1);
        assert_eq!(envelope, bare);
    }

    #[test]
    fn missing_project_list_is_empty() {
        let manifest: ProjectManifest = serde_json::from_str(r#"{"version": 2}"#).unwrap();
        assert!(manifest.project_list.is_empty());
    }

    #[test]
    fn rejects_non_document_values() {
        let err = serde_json::from_str::<ProjectManifest>("42").unwrap_err();
        assert!(err.to_string().contains("found a number"), "{err}");
    }

    #[test]
    fn bad_entry_is_reported_by_position_and_id() {
        let document = format!(
            r#"{{"project_list": [{PROJECT}, {{"id": "x", "title": "X", "category": "experiment",
                "thumbnail": {{"type": "image", "path": "x.jpg"}}}}]}}"#
        );
        let err = serde_json::from_str::<ProjectManifest>(&document)
            .unwrap_err()
            .to_string();

        assert!(err.contains("project 1 ('x')"), "{err}");
        assert!(err.contains("experiment"), "{err}");
        assert!(!err.contains("untagged"), "{err}");
    }

    #[test]
    fn null_year_is_empty_and_bad_year_names_the_project() {
        let entry = |year: &str| {
            format!(
                r#"[{{"id": "y", "title": "Y", "category": "work", "year": {year},
                    "thumbnail": {{"type": "image", "path": "y.jpg"}}}}]"#
            )
        };

        let manifest: ProjectManifest = serde_json::from_str(&entry("null")).unwrap();
        assert_eq!(manifest.project_list[0].year, "");

        let err = serde_json::from_str::<ProjectManifest>(&entry("true"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("project 0 ('y')"), "{err}");
        assert!(err.contains("a year as a number or a string"), "{err}");
    }
}
