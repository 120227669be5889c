use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use super::scan::is_hidden;
use crate::config::ScanSettings;
use crate::metadata::{ALBUM_FILE, SINGLES_FILE};

/// Collection documents found under a root directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Collections {
    pub albums: Vec<PathBuf>,
    pub singles: Vec<PathBuf>,
}

impl Collections {
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty() && self.singles.is_empty()
    }
}

/// Walk `root` collecting every `album.toml` and `singles.toml`.
///
/// Unreadable entries are logged and skipped. Results are sorted by path.
pub fn discover(root: &Path, settings: &ScanSettings) -> Collections {
    let mut found = Collections::default();

    let mut walker = WalkDir::new(root).follow_links(settings.follow_links);
    if let Some(d) = settings.max_depth {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        match entry.file_name().to_str() {
            Some(ALBUM_FILE) => found.albums.push(entry.into_path()),
            Some(SINGLES_FILE) => found.singles.push(entry.into_path()),
            _ => {}
        }
    }

    found.albums.sort();
    found.singles.sort();
    found
}
