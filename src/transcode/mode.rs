use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// Target container/codec policy for one run.
///
/// Settings files and the command line accept the same names, matched
/// case-insensitively.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum TranscodeMode {
    /// Keep the source container, but store `.wav` sources as `.flac`.
    /// Named `dwebble`, alias `passthrough`.
    #[default]
    PassthroughMatchingContainer,
    /// Always produce `.mp3`.
    ForceMp3,
    /// Always produce `.opus`.
    ForceOpus,
    /// Keep the source container; only rewrite tags and names.
    /// Named `map`, alias `identity`.
    IdentityMap,
}

impl TranscodeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TranscodeMode::PassthroughMatchingContainer => "dwebble",
            TranscodeMode::ForceMp3 => "mp3",
            TranscodeMode::ForceOpus => "opus",
            TranscodeMode::IdentityMap => "map",
        }
    }

    /// Output extension for a normalized (lowercase, dotted) source extension.
    pub fn output_extension(self, source_ext: &str) -> String {
        match self {
            TranscodeMode::PassthroughMatchingContainer if source_ext == ".wav" => {
                ".flac".to_string()
            }
            TranscodeMode::PassthroughMatchingContainer => source_ext.to_string(),
            TranscodeMode::ForceMp3 => ".mp3".to_string(),
            TranscodeMode::ForceOpus => ".opus".to_string(),
            TranscodeMode::IdentityMap => source_ext.to_string(),
        }
    }
}

impl fmt::Display for TranscodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranscodeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dwebble" | "passthrough" => Ok(TranscodeMode::PassthroughMatchingContainer),
            "mp3" => Ok(TranscodeMode::ForceMp3),
            "opus" => Ok(TranscodeMode::ForceOpus),
            "map" | "identity" => Ok(TranscodeMode::IdentityMap),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for TranscodeMode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
