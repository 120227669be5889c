use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ScanSettings;
use crate::error::{Error, Result};

pub(super) fn has_extension(path: &Path, exts: &[String]) -> bool {
    let exts = crate::config::normalized_extensions(exts);

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

pub(super) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Files directly inside `dir` (no recursion), sorted by name.
fn files_in(dir: &Path, settings: &ScanSettings) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::io(path, e.into())
        })?;

        let path = entry.path();
        if entry.file_type().is_file() && (settings.include_hidden || !is_hidden(path)) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Audio files directly inside `dir` whose extension is a track extension.
pub fn list_tracks(dir: &Path, settings: &ScanSettings) -> Result<Vec<PathBuf>> {
    Ok(files_in(dir, settings)?
        .into_iter()
        .filter(|p| has_extension(p, &settings.track_extensions))
        .collect())
}

/// File name of the first image in `dir` (by name) with a cover extension.
pub fn find_cover(dir: &Path, settings: &ScanSettings) -> Result<Option<String>> {
    Ok(files_in(dir, settings)?
        .into_iter()
        .find(|p| has_extension(p, &settings.cover_extensions))
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned())))
}
