use std::ffi::OsString;
use std::path::Path;

use super::mode::TranscodeMode;
use crate::metadata::{Album, Track};
use crate::sanitize::safe_name;

/// Average bitrate for VBR Opus encodes.
pub const OPUS_BITRATE: &str = "128k";

/// Lowercase an extension and make sure it carries a leading dot.
/// An empty extension stays empty.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().trim_start_matches('.');
    if ext.is_empty() {
        String::new()
    } else {
        format!(".{}", ext.to_ascii_lowercase())
    }
}

/// Normalized extension of `path` (`""` when it has none).
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| normalize_extension(&e.to_string_lossy()))
        .unwrap_or_default()
}

/// `"NN - Name.ext"` before sanitizing.
pub fn destination_name(num: u32, name: &str, output_ext: &str) -> String {
    format!("{num:02} - {}{output_ext}", name.trim())
}

fn join_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Tags to write for `track`, in a fixed order, skipping empty values.
pub fn metadata_tags(track: &Track, album: &Album) -> Vec<(&'static str, String)> {
    let candidates = [
        ("title", track.name.trim().to_string()),
        ("artist", track.artist_or(album.album_artist()).to_string()),
        ("album_artist", album.album_artist().to_string()),
        ("album", album.title().to_string()),
        ("track", track.num.to_string()),
        ("tags", join_list(&track.tags)),
        ("date", track.date.trim().to_string()),
        ("featuring", join_list(&track.featuring)),
        ("genre", join_list(&track.genres)),
    ];

    candidates
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .collect()
}

/// Everything needed to turn one source file into one library file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodePlan {
    pub output_ext: String,
    /// Stream-copy the audio instead of re-encoding it.
    pub copy: bool,
    pub tags: Vec<(&'static str, String)>,
    /// Sanitized destination file name.
    pub file_name: String,
}

impl TranscodePlan {
    pub fn build(mode: TranscodeMode, source_ext: &str, track: &Track, album: &Album) -> Self {
        let source_ext = normalize_extension(source_ext);
        let output_ext = mode.output_extension(&source_ext);
        let copy = source_ext == output_ext;
        let file_name = safe_name(&destination_name(track.num, &track.name, &output_ext));

        Self {
            copy,
            tags: metadata_tags(track, album),
            file_name,
            output_ext,
        }
    }

    /// Codec flags: stream copy, VBR Opus, or nothing (transcoder defaults).
    pub fn codec_args(&self) -> Vec<&'static str> {
        if self.copy {
            vec!["-codec", "copy"]
        } else if self.output_ext == ".opus" {
            vec!["-vbr", "on", "-b:a", OPUS_BITRATE]
        } else {
            Vec::new()
        }
    }

    /// Full transcoder argument list:
    /// `-i <src> -vn -map_metadata -1 [-metadata k=v]* [codec flags] <dst>`.
    pub fn args(&self, source: &Path, destination: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-i".into(),
            source.into(),
            "-vn".into(),
            "-map_metadata".into(),
            "-1".into(),
        ];

        for (key, value) in &self.tags {
            args.push("-metadata".into());
            args.push(format!("{key}={value}").into());
        }

        args.extend(self.codec_args().into_iter().map(OsString::from));
        args.push(destination.into());
        args
    }
}
