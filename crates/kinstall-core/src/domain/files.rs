//! File classification rules for the installer layers.

use std::path::Path;

use crate::domain::{entities::layout::ENV_SUFFIX, error::DomainError};

const MANIFEST_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// `true` if `path` names a Kubernetes resource document.
pub fn is_manifest_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MANIFEST_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Logical generator name for an env file.
///
/// `app.env` -> `app`, `app.properties` -> `app`, `app` -> `app`.
///
/// Files without the `.env` suffix lose their last extension too, so every
/// generator name is a bare stem regardless of how the env file is named.
pub fn generator_name(file_name: &str) -> String {
    match file_name.strip_suffix(ENV_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name)
            .to_string(),
    }
}

/// The final path segment of `path` as UTF-8.
pub fn file_name_of(path: &Path) -> Result<&str, DomainError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DomainError::NonUtf8FileName {
            path: path.display().to_string(),
        })
}
