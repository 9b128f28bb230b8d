//! Persistence sink seam.
//!
//! The core never touches storage itself. [`publish`] hands each category's
//! record list to a [`ChangeSink`], which decides where it goes.

use crate::classify::model::{Category, ClassificationBatch, ResourceChange};
use crate::errors::Result;

/// Destination for classified record lists
///
/// Implementations key each write by `{category}_{section}`.
pub trait ChangeSink {
    /// Store one category's records for a section
    ///
    /// # Errors
    ///
    /// Implementation-defined; file sinks report `Io`, `Serialization` or
    /// `Persistence`.
    fn write(&mut self, category: Category, section: &str, records: &[ResourceChange])
        -> Result<()>;
}

/// Destination key for a category of a section, e.g. `update_resource_changes`
pub fn destination_key(category: Category, section: &str) -> String {
    format!("{}_{}", category.as_str(), section)
}

/// Write every category of `batch` to `sink`, in report order.
///
/// Empty categories are written too, so a sink always ends up with all six
/// destinations for the section.
///
/// # Errors
///
/// Stops at and returns the first sink error.
pub fn publish(batch: &ClassificationBatch, section: &str, sink: &mut dyn ChangeSink) -> Result<()> {
    for (category, records) in batch.categories() {
        sink.write(category, section, records)?;
        tracing::debug!(
            category = category.as_str(),
            section,
            record_count = records.len(),
            "published category"
        );
    }
    Ok(())
}

/// Sink that keeps writes in memory, in call order
///
/// Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Vec<(String, Vec<ResourceChange>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination keys and records, in the order they were written
    pub fn writes(&self) -> &[(String, Vec<ResourceChange>)] {
        &self.writes
    }

    /// Records most recently written under `key`
    pub fn get(&self, key: &str) -> Option<&[ResourceChange]> {
        self.writes
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, records)| records.as_slice())
    }
}

impl ChangeSink for MemorySink {
    fn write(
        &mut self,
        category: Category,
        section: &str,
        records: &[ResourceChange],
    ) -> Result<()> {
        self.writes
            .push((destination_key(category, section), records.to_vec()));
        Ok(())
    }
}
