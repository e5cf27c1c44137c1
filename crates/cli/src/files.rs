//! Resolving `--file` arguments into uploads.

use docqa_core::{AppError, AppResult};
use docqa_documents::UploadedFile;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Read every file named on the command line, expanding directories.
pub fn collect_uploads(paths: &[PathBuf]) -> AppResult<Vec<UploadedFile>> {
    let mut uploads = Vec::new();

    for path in paths {
        for file in expand_path(path)? {
            uploads.push(UploadedFile::from_path(&file)?);
        }
    }

    tracing::debug!("Collected {} uploads from {} paths", uploads.len(), paths.len());

    Ok(uploads)
}

/// A file path as-is; a directory as its non-hidden files, sorted by path.
pub fn expand_path(path: &Path) -> AppResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(AppError::Document(format!("File not found: {}", path.display())));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry.map_err(|e| {
            AppError::Document(format!("Failed to read directory {}: {}", path.display(), e))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
