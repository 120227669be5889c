use std::collections::HashMap;
use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;

use super::{ProbeInfo, Prober};
use crate::error::{Error, Result};

/// Reads tags in-process instead of spawning `ffprobe`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTags;

const KEYS: [(&str, ItemKey); 7] = [
    ("title", ItemKey::TrackTitle),
    ("artist", ItemKey::TrackArtist),
    ("album", ItemKey::AlbumTitle),
    ("album_artist", ItemKey::AlbumArtist),
    ("date", ItemKey::RecordingDate),
    ("genre", ItemKey::Genre),
    ("track", ItemKey::TrackNumber),
];

impl Prober for EmbeddedTags {
    fn probe(&self, path: &Path) -> Result<ProbeInfo> {
        let tagged = lofty::read_from_path(path)
            .map_err(|e| Error::Lofty(format!("{}: {e}", path.display())))?;

        let duration = tagged.properties().duration();
        let mut tags = HashMap::new();

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            for (name, key) in &KEYS {
                if let Some(v) = tag.get_string(key) {
                    if !v.trim().is_empty() {
                        tags.insert(name.to_string(), v.to_string());
                    }
                }
            }
        }

        Ok(ProbeInfo { duration, tags })
    }
}
