// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::documents::DocumentSource;
use crate::standards::{OutputFormat, StandardsTable};
use crate::utils::error::StorageError;

/// Record count extracted from one source document, for the metadata sidecar
#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub source: DocumentSource,
    pub record_count: usize,
}

pub struct StorageManager {
    output_path: PathBuf,
}

impl StorageManager {
    /// Creates a StorageManager writing to `output_path`, creating its parent directory if needed
    pub fn new<P: AsRef<Path>>(output_path: P) -> Result<Self, StorageError> {
        let output_path = output_path.as_ref().to_path_buf();

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(StorageError::IoError)?;
            }
        }

        Ok(Self { output_path })
    }

    /// Path of the metadata sidecar, e.g. `qualifyingTotals.ts.meta.json`
    pub fn metadata_path(&self) -> PathBuf {
        let mut name = self.output_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".meta.json");
        self.output_path.with_file_name(name)
    }

    /// Writes the rendered table, replacing any previous artifact
    pub fn save_table(&self, rendered: &str) -> Result<PathBuf, StorageError> {
        fs::write(&self.output_path, rendered)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved standards table to {}", self.output_path.display());

        Ok(self.output_path.clone())
    }

    /// Saves metadata about the run in JSON format next to the table
    pub fn save_table_metadata(
        &self,
        table: &StandardsTable,
        sources: &[SourceSummary],
        format: OutputFormat,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.metadata_path();

        let sources_json: Vec<serde_json::Value> = sources
            .iter()
            .map(|s| serde_json::json!({
                "standard": s.source.kind,
                "url": s.source.url,
                "record_count": s.record_count,
            }))
            .collect();

        let brackets_json: serde_json::Map<String, serde_json::Value> = table
            .brackets
            .iter()
            .map(|b| (b.bracket.name().to_string(), serde_json::json!(b.entries.len())))
            .collect();

        let metadata = serde_json::json!({
            "output": self.output_path.display().to_string(),
            "format": format.extension(),
            "sources": sources_json,
            "entries_per_bracket": brackets_json,
            "entry_count": table.entry_count(),
            "generated_at": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}
