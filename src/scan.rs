//! Discovery of input files and their sizes.

use std::path::PathBuf;

use crate::config::ScanConfig;
use crate::error::{Result, SplitError};
use crate::partition::Item;

/// Collect every regular file in `config.dir` whose extension matches,
/// weighted by its length in bytes.
///
/// The directory is not descended into. Files come back sorted by name so
/// repeated runs over the same directory partition identically.
///
/// # Errors
///
/// - [`SplitError::NotADirectory`] if `config.dir` is missing or not a directory
/// - [`SplitError::NoMatchingFiles`] if nothing matches the extension
/// - [`SplitError::Io`] if the directory itself can't be inspected or read
pub async fn scan_directory(config: &ScanConfig) -> Result<Vec<Item<PathBuf>>> {
    let is_dir = match tokio::fs::metadata(&config.dir).await {
        Ok(metadata) => metadata.is_dir(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };
    if !is_dir {
        return Err(SplitError::NotADirectory(config.dir.clone()));
    }

    let mut entries = tokio::fs::read_dir(&config.dir).await?;
    let mut items = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !has_extension(&path, &config.extension) {
            continue;
        }
        // Follows symlinks so a linked file is weighted by its target.
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !metadata.is_file() {
            tracing::debug!(path = %path.display(), "Skipping non-file entry");
            continue;
        }
        items.push(Item::new(path, metadata.len()));
    }

    if items.is_empty() {
        return Err(SplitError::NoMatchingFiles {
            dir: config.dir.clone(),
            extension: config.extension.clone(),
        });
    }

    items.sort_by(|a, b| a.handle.cmp(&b.handle));
    tracing::info!(
        dir = %config.dir.display(),
        extension = %config.extension,
        files = items.len(),
        "Scanned input directory"
    );
    Ok(items)
}

fn has_extension(path: &std::path::Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}
