//! Filesystem project writer.
//!
//! Writes generated artifacts below a project directory, with support for
//! dry-run mode.

use std::path::{Path, PathBuf};

use mf_scaffold::generator::GeneratedArtifact;
use mf_scaffold::writer::{ProjectWriter, WriteResult};
use mf_scaffold::WriteError;
use tracing::debug;

/// Project writer rooted at a directory.
#[derive(Debug)]
pub struct FsProjectWriter {
    /// Project directory all paths are relative to.
    root: PathBuf,

    /// Whether to run in dry-run mode.
    dry_run: bool,
}

impl FsProjectWriter {
    /// Create a new writer for `root`.
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
        }
    }

    /// Project directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if running in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn absolute(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }
}

impl ProjectWriter for FsProjectWriter {
    fn exists(&self, relative_path: &Path) -> bool {
        self.absolute(relative_path).exists()
    }

    /// In dry-run mode, returns the content without writing.
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<WriteResult, WriteError> {
        let path = self.absolute(&artifact.relative_path);

        if artifact.kind.is_hand_editable() && path.exists() {
            return Err(WriteError::ProtectedPartial { path });
        }

        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: artifact.content.clone(),
                path,
            });
        }

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(&path, artifact.bytes()).map_err(|e| WriteError::WriteFile {
            path: path.clone(),
            source: e,
        })?;
        debug!(path = %path.display(), bytes = artifact.content.len(), "wrote artifact");

        Ok(WriteResult::Written {
            path,
            bytes: artifact.content.len(),
        })
    }

    /// Resolves the file inside the project; launching an editor is left
    /// to the caller.
    fn open_for_editing(&mut self, relative_path: &Path) -> Result<PathBuf, WriteError> {
        Ok(self.absolute(relative_path))
    }
}
