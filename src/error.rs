//! Crate-wide error type.
//!
//! Variants are grouped the way failures actually happen in a run:
//! configuration, filesystem, external tools, and name/number derivation.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load settings: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("{}: {source}", path.display())]
    ParseMetadata {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize metadata: {0}")]
    SerializeMetadata(#[from] toml::ser::Error),

    #[error("{}: {reason}", path.display())]
    InvalidMetadata { path: PathBuf, reason: String },

    #[error("unknown transcode mode: {0:?}")]
    UnknownMode(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("{} already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("could not run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program} {args}` exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        args: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("could not parse prober output: {0}")]
    ProbeOutput(#[from] serde_json::Error),

    #[error("could not read tags: {0}")]
    Lofty(String),

    #[error("no track number pattern matches filename {0:?}")]
    UnrecognizedFilename(String),

    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{album}: {failed} of {total} tracks failed")]
    TracksFailed {
        album: String,
        failed: usize,
        total: usize,
    },

    #[error("{failed} of {total} collections failed")]
    CollectionsFailed { failed: usize, total: usize },
}

impl Error {
    /// Attach the offending path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Extension for tagging `io::Result`s with the path they were about.
pub trait IoContext<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| Error::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_name_their_path() {
        let err = std::fs::read("/definitely/not/here/album.toml")
            .with_path("/definitely/not/here/album.toml")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("/definitely/not/here/album.toml: "), "{msg}");
    }

    #[test]
    fn tracks_failed_reads_like_a_summary() {
        let err = Error::TracksFailed {
            album: "Blue Train".into(),
            failed: 2,
            total: 5,
        };
        assert_eq!(err.to_string(), "Blue Train: 2 of 5 tracks failed");
    }
}
