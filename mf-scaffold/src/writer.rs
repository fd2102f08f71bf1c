//! Project writer seam.
//!
//! The orchestrator persists artifacts through a [`ProjectWriter`] and never
//! touches the filesystem itself. [`MemoryProjectWriter`] keeps everything
//! in memory for tests and embedders that post-process the output.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::WriteError;
use crate::generator::GeneratedArtifact;

/// Result of a write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written successfully.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Dry run - content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        /// Path where content would have been written.
        path: PathBuf,
    },
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } => path,
            WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the write was successful (not dry-run).
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Get the number of bytes written (0 for dry-run).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            WriteResult::DryRun { .. } => 0,
        }
    }
}

/// Where generated artifacts go. Paths are relative to the project
/// directory.
pub trait ProjectWriter {
    /// Whether a file already exists at `relative_path`.
    fn exists(&self, relative_path: &Path) -> bool;

    /// Persist one artifact, creating intermediate directories.
    ///
    /// Implementations must refuse to replace an existing hand-editable
    /// artifact with [`WriteError::ProtectedPartial`].
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<WriteResult, WriteError>;

    /// Hand a file to the user's editor or source control. Returns the
    /// location that was opened.
    fn open_for_editing(&mut self, relative_path: &Path) -> Result<PathBuf, WriteError>;
}

impl<W: ProjectWriter + ?Sized> ProjectWriter for &mut W {
    fn exists(&self, relative_path: &Path) -> bool {
        (**self).exists(relative_path)
    }

    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<WriteResult, WriteError> {
        (**self).write(artifact)
    }

    fn open_for_editing(&mut self, relative_path: &Path) -> Result<PathBuf, WriteError> {
        (**self).open_for_editing(relative_path)
    }
}

/// In-memory project.
#[derive(Debug, Default, Clone)]
pub struct MemoryProjectWriter {
    files: BTreeMap<PathBuf, String>,
    opened: Vec<PathBuf>,
}

impl MemoryProjectWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file as if it had been written earlier.
    pub fn with_file(mut self, relative_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(relative_path.into(), content.into());
        self
    }

    /// Content at `relative_path`, if any.
    pub fn get(&self, relative_path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(relative_path.as_ref()).map(String::as_str)
    }

    /// Every stored path, sorted.
    pub fn paths(&self) -> Vec<&Path> {
        self.files.keys().map(PathBuf::as_path).collect()
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    /// Paths passed to [`ProjectWriter::open_for_editing`], in call order.
    pub fn opened(&self) -> &[PathBuf] {
        &self.opened
    }
}

impl ProjectWriter for MemoryProjectWriter {
    fn exists(&self, relative_path: &Path) -> bool {
        self.files.contains_key(relative_path)
    }

    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<WriteResult, WriteError> {
        let path = &artifact.relative_path;
        if artifact.kind.is_hand_editable() && self.exists(path) {
            return Err(WriteError::ProtectedPartial { path: path.clone() });
        }

        self.files.insert(path.clone(), artifact.content.clone());
        Ok(WriteResult::Written {
            path: path.clone(),
            bytes: artifact.content.len(),
        })
    }

    fn open_for_editing(&mut self, relative_path: &Path) -> Result<PathBuf, WriteError> {
        self.opened.push(relative_path.to_path_buf());
        Ok(relative_path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ArtifactKind;

    #[test]
    fn test_memory_writer_round_trip() {
        let mut writer = MemoryProjectWriter::new();
        let artifact = GeneratedArtifact::new("Models/Invoice.cs", "class", ArtifactKind::Class);

        let result = writer.write(&artifact).unwrap();

        assert!(result.was_written());
        assert_eq!(result.bytes(), 5);
        assert!(writer.exists(Path::new("Models/Invoice.cs")));
        assert_eq!(writer.get("Models/Invoice.cs"), Some("class"));
    }

    #[test]
    fn test_generated_files_are_replaced() {
        let mut writer = MemoryProjectWriter::new().with_file("Models/Invoice.cs", "old");
        let artifact = GeneratedArtifact::new("Models/Invoice.cs", "new", ArtifactKind::Class);

        writer.write(&artifact).unwrap();
        assert_eq!(writer.get("Models/Invoice.cs"), Some("new"));
    }

    #[test]
    fn test_existing_partial_is_protected() {
        let mut writer =
            MemoryProjectWriter::new().with_file("Models/Partials/Invoice.cs", "// mine");
        let artifact = GeneratedArtifact::new(
            "Models/Partials/Invoice.cs",
            "skeleton",
            ArtifactKind::ClassPartial,
        );

        let err = writer.write(&artifact).unwrap_err();
        assert!(matches!(err, WriteError::ProtectedPartial { .. }));
        assert_eq!(writer.get("Models/Partials/Invoice.cs"), Some("// mine"));
    }

    #[test]
    fn test_open_for_editing_is_recorded() {
        let mut writer = MemoryProjectWriter::new();
        let opened = writer
            .open_for_editing(Path::new("Models/Partials/Invoice.cs"))
            .unwrap();

        assert_eq!(opened, PathBuf::from("Models/Partials/Invoice.cs"));
        assert_eq!(writer.opened(), &[PathBuf::from("Models/Partials/Invoice.cs")]);
    }

    #[test]
    fn test_write_result_accessors() {
        let dry_run = WriteResult::DryRun {
            content: "test".to_string(),
            path: PathBuf::from("Models/A.cs"),
        };
        assert_eq!(dry_run.path(), Path::new("Models/A.cs"));
        assert!(!dry_run.was_written());
        assert_eq!(dry_run.bytes(), 0);
    }
}
