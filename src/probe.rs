//! Reading what an existing audio file already says about itself.
//!
//! Two independent sources feed `init`: embedded tags (via a [`Prober`])
//! and the file name (via the matchers in [`filename`]).

mod embedded;
mod ffprobe;
pub mod filename;

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub use embedded::EmbeddedTags;
pub use ffprobe::{Ffprobe, parse_report};
pub use filename::parse_filename;

use crate::config::{ProberKind, Settings};
use crate::error::Result;

/// Duration and tags of one audio file. Tag keys are lowercase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeInfo {
    pub duration: Duration,
    pub tags: HashMap<String, String>,
}

impl ProbeInfo {
    /// Non-blank tag value, looked up case-insensitively.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(&key.to_lowercase())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Positive track number from the `track` tag (`"3/12"` reads as 3).
    pub fn track_number(&self) -> Option<u32> {
        self.tag("track").and_then(parse_number).filter(|&n| n > 0)
    }
}

/// Leading number of values like `"3"` or `"3/12"`.
pub fn parse_number(value: &str) -> Option<u32> {
    value.split('/').next()?.trim().parse().ok()
}

pub(crate) fn lowercase_keys(tags: HashMap<String, String>) -> HashMap<String, String> {
    tags.into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect()
}

/// Source of embedded metadata for a file.
pub trait Prober {
    fn probe(&self, path: &Path) -> Result<ProbeInfo>;
}

/// The prober selected by settings.
pub fn from_settings(settings: &Settings) -> Box<dyn Prober> {
    match settings.scan.prober {
        ProberKind::Ffprobe => Box::new(Ffprobe::new(settings.tools.ffprobe.clone())),
        ProberKind::Lofty => Box::new(EmbeddedTags),
    }
}
