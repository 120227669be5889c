use serde::Deserialize;

use crate::transcode::TranscodeMode;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/albumize/config.toml`
/// or `~/.config/albumize/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags (applied by the caller after loading)
/// 2) Environment variables (prefix `ALBUMIZE__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tools: ToolSettings,
    pub convert: ConvertSettings,
    pub scan: ScanSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Transcoder program name or path.
    pub ffmpeg: String,
    /// Prober program name or path.
    pub ffprobe: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    /// Target container policy used when `--mode` is not given.
    pub mode: TranscodeMode,
    /// Number of concurrent transcoder processes per album.
    /// 0 means "one per available CPU".
    pub jobs: usize,
    /// What to do with the rest of an album once a track fails.
    pub on_failure: FailurePolicy,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            mode: TranscodeMode::PassthroughMatchingContainer,
            jobs: 0,
            on_failure: FailurePolicy::Abort,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop starting new tracks after the first failure.
    #[default]
    #[serde(alias = "stop", alias = "fail-fast")]
    Abort,
    /// Run every track, then report all failures together.
    #[serde(alias = "keep_going", alias = "continue")]
    KeepGoing,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProberKind {
    /// Shell out to `ffprobe` and parse its JSON report.
    #[default]
    Ffprobe,
    /// Read tags in-process.
    Lofty,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// File extensions treated as tracks by `init` (case-insensitive, without dot).
    pub track_extensions: Vec<String>,
    /// File extensions treated as cover art by `init` (case-insensitive, without dot).
    pub cover_extensions: Vec<String>,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to follow symlinks while looking for collections.
    pub follow_links: bool,
    /// Optional cap on directory recursion depth for `convert all`.
    pub max_depth: Option<usize>,
    /// Which tag reader `init` uses.
    pub prober: ProberKind,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            track_extensions: vec!["wav".into(), "flac".into(), "mp3".into()],
            cover_extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
            include_hidden: false,
            follow_links: true,
            max_depth: None,
            prober: ProberKind::Ffprobe,
        }
    }
}
