//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kinstall-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Namespace, NamespaceFolders};
use crate::error::InstallerResult;

/// How deep a directory walk descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDepth {
    /// Every file below the root, at any depth.
    Recursive,
    /// Only files directly inside the root.
    Shallow,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kinstall_adapters::filesystem::LocalFilesystem` (production)
/// - `kinstall_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `walk_files` returns a complete snapshot, sorted by path, so callers can
///   mutate the tree afterwards without disturbing the traversal
/// - `rename` never overwrites; an existing destination is an error
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> InstallerResult<()>;

    /// Write content to a file, creating or truncating it.
    fn write_file(&self, path: &Path, content: &str) -> InstallerResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Move a file, or a folder with all its contents, to `to`.
    fn rename(&self, from: &Path, to: &Path) -> InstallerResult<()>;

    /// Collect the regular files under `root`. Directories are never returned.
    fn walk_files(&self, root: &Path, depth: WalkDepth) -> InstallerResult<Vec<PathBuf>>;
}

/// Port for namespace path resolution.
///
/// Implemented by:
/// - `kinstall_adapters::layout::StandardLayout`
pub trait LayoutResolver: Send + Sync {
    /// Resolve every folder role of `namespace`.
    fn folders(&self, namespace: &Namespace) -> NamespaceFolders;
}
