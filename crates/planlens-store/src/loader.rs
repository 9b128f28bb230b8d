//! Plan document loading

use crate::errors::{io_error, parse_error, Result};
use planlens_core::errors::LensError;
use planlens_core::plan::PlanDocument;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read and parse a JSON file
///
/// # Errors
///
/// - `Io`: the file could not be read
/// - `Serialization`: the content is not valid JSON
pub fn load_json(path: &Path) -> Result<Value> {
    let content = fs::read(path).map_err(|e| io_error("load_json", path, e))?;
    serde_json::from_slice(&content).map_err(|e| parse_error(path, e))
}

/// Load a plan document from a JSON file
///
/// # Errors
///
/// - `Io`: the file could not be read
/// - `Serialization`: the content is not valid JSON
/// - `MalformedValue`: the JSON root is not an object
pub fn load_plan(path: &Path) -> Result<PlanDocument> {
    let value = load_json(path)?;
    let document = PlanDocument::from_value(value).map_err(|e| {
        LensError::from(e)
            .with_op("load_plan")
            .with_path(path.display().to_string())
    })?;
    tracing::debug!(path = %path.display(), "loaded plan");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planlens_core::errors::LensErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_load_plan_reads_sections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.json");
        fs::write(
            &path,
            r#"{"resource_changes": [{"name": "a", "type": "t", "change": {"actions": ["no-op"]}}]}"#,
        )
        .unwrap();

        let plan = load_plan(&path).unwrap();
        assert_eq!(plan.section_records("resource_changes").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_plan(&temp_dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), LensErrorKind::Io);
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_plan(&path).unwrap_err();
        assert_eq!(err.kind(), LensErrorKind::Serialization);
    }

    #[test]
    fn test_array_root_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.json");
        fs::write(&path, "[]").unwrap();

        let err = load_plan(&path).unwrap_err();
        assert_eq!(err.kind(), LensErrorKind::MalformedValue);
    }
}
