use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::model::{Album, Singles};
use crate::error::{Error, IoContext, Result};

pub const ALBUM_FILE: &str = "album.toml";
pub const SINGLES_FILE: &str = "singles.toml";

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_path(path)?;
    toml::from_str(&text).map_err(|source| Error::ParseMetadata {
        path: path.to_path_buf(),
        source,
    })
}

fn write_document<T: Serialize>(doc: &T, path: &Path) -> Result<()> {
    let text = toml::to_string_pretty(doc)?;
    fs::write(path, text).with_path(path)
}

fn invalid(path: &Path, reason: String) -> Error {
    Error::InvalidMetadata {
        path: path.to_path_buf(),
        reason,
    }
}

impl Album {
    /// Read and validate an `album.toml`.
    pub fn load(path: &Path) -> Result<Self> {
        let album: Album = read_document(path)?;
        album.validate().map_err(|reason| invalid(path, reason))?;
        Ok(album)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_document(self, path)
    }
}

impl Singles {
    /// Read and validate a `singles.toml`.
    pub fn load(path: &Path) -> Result<Self> {
        let singles: Singles = read_document(path)?;
        for album in singles.albums() {
            album
                .validate()
                .map_err(|reason| invalid(path, format!("{}: {reason}", album.album)))?;
        }
        Ok(singles)
    }
}
