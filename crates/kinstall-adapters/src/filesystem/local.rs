//! Local filesystem adapter using std::fs and walkdir.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use kinstall_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, WalkDepth},
    },
    error::{InstallerError, InstallerResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> InstallerResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> InstallerResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn rename(&self, from: &Path, to: &Path) -> InstallerResult<()> {
        // std::fs::rename silently replaces files (and empty dirs on unix).
        if to.exists() {
            return Err(ApplicationError::DestinationExists {
                path: to.to_path_buf(),
            }
            .into());
        }
        std::fs::rename(from, to).map_err(|e| {
            map_io_error(from, e, &format!("move to {}", to.display()))
        })
    }

    fn walk_files(&self, root: &Path, depth: WalkDepth) -> InstallerResult<Vec<PathBuf>> {
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();
        if depth == WalkDepth::Shallow {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for walk_entry in walker {
            let walk_entry = walk_entry.map_err(|e| map_walk_error(root, e))?;

            if !walk_entry.file_type().is_file() {
                trace!(path = %walk_entry.path().display(), "Skipping non-file entry");
                continue;
            }
            files.push(walk_entry.into_path());
        }

        files.sort();
        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> InstallerError {
    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> InstallerError {
    let path = e.path().unwrap_or(root).to_path_buf();
    ApplicationError::Walk {
        path,
        reason: e.to_string(),
    }
    .into()
}
