use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::metadata::{Album, Track};
use crate::probe::{Prober, parse_filename};

/// Defaults supplied on the command line for every generated track.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    /// Overrides any `date` tag.
    pub year: Option<u32>,
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build an album document from the audio files of one directory.
///
/// File names supply `(num, name)`; embedded tags, when present, override
/// them. Files whose name matches no known pattern are skipped.
pub fn synthesize_album(
    files: &[PathBuf],
    cover_art: Option<String>,
    prober: &dyn Prober,
    options: &InitOptions,
) -> Result<Album> {
    let mut album_name: Option<String> = None;
    let mut album_artist: Option<String> = None;
    let mut tracks = Vec::new();

    for path in files {
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };

        let from_name = match parse_filename(&file_name) {
            Ok(info) => info,
            Err(e @ (Error::UnrecognizedFilename(_) | Error::InvalidNumber { .. })) => {
                warn!("skipping {}: {e}", path.display());
                continue;
            }
            Err(e) => return Err(e),
        };

        let info = prober.probe(path)?;
        debug!(
            "{file_name}: {} ({:.0}s, {} tags)",
            from_name.pattern.as_str(),
            info.duration.as_secs_f64(),
            info.tags.len()
        );

        if album_name.is_none() {
            album_name = info.tag("album").map(str::to_string);
        }
        if album_artist.is_none() {
            album_artist = info.tag("album_artist").map(str::to_string);
        }

        let name = info
            .tag("title")
            .map(str::to_string)
            .or_else(|| Some(from_name.name.clone()).filter(|n| !n.is_empty()))
            .unwrap_or_else(|| file_stem(path));

        let mut artists = info.tag("artist").map(split_list).unwrap_or_default();
        let artist = if artists.is_empty() {
            None
        } else {
            Some(artists.remove(0))
        };

        let genres = info
            .tag("genres")
            .or_else(|| info.tag("genre"))
            .map(split_list)
            .unwrap_or_else(|| options.genres.clone());

        let date = match options.year {
            Some(year) => year.to_string(),
            None => info.tag("date").unwrap_or_default().to_string(),
        };

        tracks.push(Track {
            filename: file_name,
            num: info.track_number().unwrap_or(from_name.number),
            name,
            artist,
            date,
            tags: options.tags.clone(),
            genres,
            featuring: artists,
        });
    }

    let artist = album_artist
        .or_else(|| tracks.first().and_then(|t| t.artist.clone()))
        .unwrap_or_default();

    for track in &mut tracks {
        if track.artist.as_deref() == Some(artist.as_str()) {
            track.artist = None;
        }
    }
    tracks.sort_by_key(|t| t.num);

    Ok(Album {
        album: album_name.unwrap_or_default(),
        artist,
        cover_art,
        tracks,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
