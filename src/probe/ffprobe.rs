use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::{ProbeInfo, Prober, lowercase_keys};
use crate::error::{Error, Result};
use crate::process::run_capture;

#[derive(Debug, Default, Deserialize)]
struct Report {
    #[serde(default)]
    streams: Vec<Stream>,
    #[serde(default)]
    format: Format,
}

#[derive(Debug, Default, Deserialize)]
struct Format {
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Stream {
    #[serde(default)]
    codec_type: String,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

fn parse_seconds(value: &str) -> Result<Duration> {
    let invalid = || Error::InvalidNumber {
        field: "duration",
        value: value.to_string(),
    };
    let secs: f64 = value.trim().parse().map_err(|_| invalid())?;
    // Rejects negative, non-finite and out-of-range values.
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

/// Turn `ffprobe -print_format json -show_format -show_streams` output into
/// a [`ProbeInfo`].
///
/// Container-level tags form the base; tags on audio streams override them.
/// Video streams (embedded cover art) are ignored. Duration comes from the
/// audio stream, falling back to the container.
pub fn parse_report(json: &[u8]) -> Result<ProbeInfo> {
    let report: Report = serde_json::from_slice(json)?;

    let mut tags = lowercase_keys(report.format.tags);
    let mut duration = None;

    for stream in report.streams.into_iter().filter(|s| s.codec_type == "audio") {
        if let Some(d) = stream.duration.as_deref() {
            duration = Some(parse_seconds(d)?);
        }
        tags.extend(lowercase_keys(stream.tags));
    }

    let duration = match (duration, report.format.duration.as_deref()) {
        (Some(d), _) => d,
        (None, Some(d)) => parse_seconds(d)?,
        (None, None) => Duration::ZERO,
    };

    Ok(ProbeInfo { duration, tags })
}

/// Runs the `ffprobe` binary.
#[derive(Debug, Clone)]
pub struct Ffprobe {
    program: String,
}

impl Ffprobe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Prober for Ffprobe {
    fn probe(&self, path: &Path) -> Result<ProbeInfo> {
        let mut args: Vec<OsString> = [
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(path.into());

        let out = run_capture(&self.program, &args)?;
        let info = parse_report(&out)?;
        debug!("probed {}: {:?}", path.display(), info);
        Ok(info)
    }
}
