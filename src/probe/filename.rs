//! Track number and name from file names like `"07 - Interlude.flac"`
//! or `"track12.flac"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static NUMBERED_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[-\s]*(.+)\.").expect("valid regex"));
static TRACK_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"track(\d+).+").expect("valid regex"));

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilenamePattern {
    /// `07 - Interlude.flac`: leading number, optional separator, name.
    NumberedName,
    /// `track12.flac`: the word "track" and a number; no name.
    TrackNumber,
}

impl FilenamePattern {
    /// Tried in this order; the first match wins.
    pub const ALL: [FilenamePattern; 2] =
        [FilenamePattern::NumberedName, FilenamePattern::TrackNumber];

    pub fn as_str(self) -> &'static str {
        match self {
            FilenamePattern::NumberedName => "numbered-name",
            FilenamePattern::TrackNumber => "track-number",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            FilenamePattern::NumberedName => &NUMBERED_NAME_RE,
            FilenamePattern::TrackNumber => &TRACK_NUMBER_RE,
        }
    }

    /// `Ok(None)` when the pattern does not apply to `file_name`.
    pub fn try_match(self, file_name: &str) -> Result<Option<FilenameInfo>> {
        let Some(caps) = self.regex().captures(file_name) else {
            return Ok(None);
        };

        let digits = &caps[1];
        let number = digits.parse().map_err(|_| Error::InvalidNumber {
            field: "track number in filename",
            value: digits.to_string(),
        })?;
        let name = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        Ok(Some(FilenameInfo {
            number,
            name,
            pattern: self,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameInfo {
    pub number: u32,
    /// Empty when the pattern carries no name.
    pub name: String,
    pub pattern: FilenamePattern,
}

/// Derive `(number, name)` from a bare file name.
pub fn parse_filename(file_name: &str) -> Result<FilenameInfo> {
    for pattern in FilenamePattern::ALL {
        if let Some(info) = pattern.try_match(file_name)? {
            return Ok(info);
        }
    }
    Err(Error::UnrecognizedFilename(file_name.to_string()))
}
