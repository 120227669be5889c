use serde::{Deserialize, Serialize};

use crate::sanitize::safe_name;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Source file, relative to the document's directory.
    pub filename: String,
    /// 1-based position in the album.
    #[serde(default)]
    pub num: u32,
    pub name: String,
    /// Overrides the album artist when set and non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub featuring: Vec<String>,
}

impl Track {
    /// The track artist, falling back to `album_artist` when unset or blank.
    pub fn artist_or<'a>(&'a self, album_artist: &'a str) -> &'a str {
        match self.artist.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => a,
            _ => album_artist,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub album: String,
    pub artist: String,
    /// Cover image, relative to the document's directory.
    #[serde(default, rename = "coverart", skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Album {
    /// Trimmed album title.
    pub fn title(&self) -> &str {
        self.album.trim()
    }

    /// Trimmed album artist.
    pub fn album_artist(&self) -> &str {
        self.artist.trim()
    }

    /// Basic consistency checks run before anything touches the filesystem.
    pub fn validate(&self) -> Result<(), String> {
        if self.title().is_empty() {
            return Err("album title must not be empty".to_string());
        }
        if self.album_artist().is_empty() {
            return Err("album artist must not be empty".to_string());
        }
        for name in [self.album_artist(), self.title()] {
            if safe_name(name).is_empty() {
                return Err(format!("{name:?} has no characters usable in a file name"));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for track in &self.tracks {
            if track.filename.trim().is_empty() {
                return Err(format!("track {:?} has no filename", track.name));
            }
            if track.num == 0 {
                return Err(format!("track {:?} needs a positive `num`", track.filename));
            }
            if !seen.insert(track.num) {
                return Err(format!("track number {} is used more than once", track.num));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Single {
    pub filename: String,
    #[serde(default, rename = "coverart", skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub featuring: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Singles {
    pub artist: String,
    #[serde(default)]
    pub singles: Vec<Single>,
}

impl Singles {
    /// Each single as a one-track album named `"<name> (Single)"`.
    pub fn albums(&self) -> Vec<Album> {
        self.singles
            .iter()
            .map(|s| s.as_album(&self.artist))
            .collect()
    }
}

impl Single {
    pub fn as_album(&self, artist: &str) -> Album {
        Album {
            album: format!("{} (Single)", self.name.trim()),
            artist: artist.to_string(),
            cover_art: self.cover_art.clone(),
            tracks: vec![Track {
                filename: self.filename.clone(),
                num: 1,
                name: self.name.clone(),
                artist: self.artist.clone(),
                date: self.date.clone(),
                tags: self.tags.clone(),
                genres: self.genres.clone(),
                featuring: self.featuring.clone(),
            }],
        }
    }
}
