//! Finished report documents and where they are saved.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{ReportError, Result};
use crate::report::sections::{RenderedSection, SectionId};

pub const ARTIFACT_PREFIX: &str = "crop-analysis-report";

/// `crop-analysis-report-<YYYY-MM-DD>.<ext>`
pub fn artifact_file_name(date: NaiveDate, extension: &str) -> String {
    format!("{}-{}.{}", ARTIFACT_PREFIX, date.format("%Y-%m-%d"), extension)
}

/// A rendered document plus the per-section command lists it was drawn from.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub sections: Vec<RenderedSection>,
}

impl ReportArtifact {
    pub fn section(&self, id: SectionId) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Sections that emitted at least one command, in paint order.
    pub fn rendered_ids(&self) -> Vec<SectionId> {
        self.sections
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.id)
            .collect()
    }

    pub fn save(&self, store: &dyn ArtifactStore) -> Result<PathBuf> {
        store.save(&self.file_name, &self.bytes)
    }
}

/// Host capability that persists finished artifacts.
pub trait ArtifactStore {
    /// Write `bytes` under `file_name`, replacing any existing file.
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Saves artifacts into one directory, created on first use.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for DirectoryStore {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let assembly = |source| ReportError::AssemblyFailure {
            file_name: file_name.to_string(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(assembly)?;
        let path = self.root.join(file_name);
        fs::write(&path, bytes).map_err(assembly)?;

        tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn artifact(bytes: &[u8]) -> ReportArtifact {
        ReportArtifact {
            file_name: artifact_file_name(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), "pdf"),
            bytes: bytes.to_vec(),
            sections: Vec::new(),
        }
    }

    #[test]
    fn test_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(artifact_file_name(date, "pdf"), "crop-analysis-report-2026-01-05.pdf");
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path().join("nested"));

        let first = artifact(b"first").save(&store).unwrap();
        let second = artifact(b"second").save(&store).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), b"second");
    }

    #[test]
    fn test_save_failure_is_assembly_failure() {
        let dir = TempDir::new().unwrap();
        // A regular file where the directory should be
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, b"").unwrap();
        let store = DirectoryStore::new(blocker.clone());

        let err = artifact(b"x").save(&store).unwrap_err();
        assert!(err.is_retryable_save());
        assert!(matches!(err, ReportError::AssemblyFailure { ref file_name, .. }
            if file_name == "crop-analysis-report-2026-10-16.pdf"));
    }
}
