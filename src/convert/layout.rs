use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, IoContext, Result};
use crate::metadata::Album;
use crate::sanitize::safe_name;

/// Written next to a directory's contents when its name had to be changed.
pub const OVERRIDE_FILE: &str = "override.txt";

/// Create `parent/<safe name>` and record the raw name if it was altered.
fn named_dir(parent: &Path, raw: &str) -> Result<PathBuf> {
    let safe = safe_name(raw);
    if safe.is_empty() {
        return Err(Error::InvalidMetadata {
            path: parent.to_path_buf(),
            reason: format!("{raw:?} has no characters usable in a directory name"),
        });
    }

    let dir = parent.join(&safe);
    fs::create_dir_all(&dir).with_path(&dir)?;

    if safe != raw {
        let marker = dir.join(OVERRIDE_FILE);
        debug!("{raw:?} stored as {safe:?}");
        fs::write(&marker, raw).with_path(&marker)?;
    }

    Ok(dir)
}

/// Create `dst_root/<artist>/<album>/` and return the album directory.
pub fn prepare_album_dir(album: &Album, dst_root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dst_root).with_path(dst_root)?;
    let artist_dir = named_dir(dst_root, album.album_artist())?;
    named_dir(&artist_dir, album.title())
}

/// Copy cover art to `album_dir/cover<ext>`, keeping the source extension.
pub fn copy_cover(source: &Path, album_dir: &Path) -> Result<PathBuf> {
    let meta = fs::metadata(source).with_path(source)?;
    if !meta.is_file() {
        return Err(Error::NotAFile(source.to_path_buf()));
    }

    let file_name = match source.extension() {
        Some(ext) => format!("cover.{}", ext.to_string_lossy()),
        None => "cover".to_string(),
    };
    let dest = album_dir.join(file_name);
    fs::copy(source, &dest).with_path(&dest)?;
    Ok(dest)
}
