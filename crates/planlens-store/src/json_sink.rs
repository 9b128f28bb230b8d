//! Filesystem export of classified categories
//!
//! One compact JSON file per category and section:
//! `<root>/<category>_<section>.json`, each holding the category's record list.

use crate::atomic::atomic_write;
use crate::errors::{export_error, Result};
use planlens_core::classify::model::{Category, ResourceChange};
use planlens_core::sink::{destination_key, ChangeSink};
use std::path::{Path, PathBuf};

/// Sink writing each category to its own JSON file under a root directory
pub struct JsonFileSink {
    root: PathBuf,
}

impl JsonFileSink {
    /// Create a sink rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a category of a section is exported to
    pub fn path_for(&self, category: Category, section: &str) -> PathBuf {
        self.root
            .join(format!("{}.json", destination_key(category, section)))
    }
}

impl ChangeSink for JsonFileSink {
    fn write(
        &mut self,
        category: Category,
        section: &str,
        records: &[ResourceChange],
    ) -> Result<()> {
        let path = self.path_for(category, section);
        let bytes = serde_json::to_vec(records)
            .map_err(|e| export_error(&destination_key(category, section), &e.to_string()))?;

        atomic_write(&path, &bytes)?;
        tracing::debug!(
            path = %path.display(),
            record_count = records.len(),
            "exported category"
        );
        Ok(())
    }
}
