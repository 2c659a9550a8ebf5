//! Diagnostic artifacts for fragments that failed to normalize.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::types::ResponseEnvelope;

/// Writes `[fragment, envelope]` as pretty JSON to a fresh file in `dir`,
/// creating the directory on first use. Returns the file's path.
pub(crate) fn write_artifact(
    dir: &Path,
    fragment: &Value,
    envelope: Option<&ResponseEnvelope>,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(artifact_name());
    let body = serde_json::to_string_pretty(&(fragment, envelope)).map_err(io::Error::other)?;
    fs::write(&path, body)?;
    Ok(path)
}

/// `<random token>-<unix millis>.txt`
fn artifact_name() -> String {
    format!(
        "{}-{}.txt",
        Uuid::new_v4().simple(),
        Utc::now().timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn artifact_holds_arguments() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("a").join("dumps");
        let fragment = json!({"bogusRenderer": {"x": 1}});
        let envelope = ResponseEnvelope::collecting_refinements();

        let path = write_artifact(&nested, &fragment, Some(&envelope)).expect("artifact written");
        assert!(path.starts_with(&nested));
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("txt"));

        let body = fs::read_to_string(&path).expect("artifact readable");
        let value: Value = serde_json::from_str(&body).expect("artifact is json");
        assert_eq!(value[0], fragment);
        assert_eq!(value[1]["refinements"], json!([]));
    }

    #[test]
    fn names_do_not_collide() {
        let first = artifact_name();
        let second = artifact_name();
        assert_ne!(first, second);
        let (token, millis) = first
            .trim_end_matches(".txt")
            .split_once('-')
            .expect("token and timestamp");
        assert_eq!(token.len(), 32);
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn missing_envelope_is_null() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_artifact(dir.path(), &json!({"videoRenderer": {}}), None)
            .expect("artifact written");
        let value: Value =
            serde_json::from_str(&fs::read_to_string(path).expect("artifact readable"))
                .expect("artifact is json");
        assert_eq!(value[1], Value::Null);
    }
}
