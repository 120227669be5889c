//! Batch conversion of one album: destination directories, name overrides,
//! cover art, and one transcoder run per track on a bounded worker pool.

mod console;
mod layout;
mod pool;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use console::Console;
pub use layout::{OVERRIDE_FILE, copy_cover, prepare_album_dir};
pub use pool::{TrackJob, worker_count};

use crate::config::{ConvertSettings, FailurePolicy};
use crate::error::{Error, Result};
use crate::metadata::Album;
use crate::transcode::{TranscodeMode, TranscodePlan, Transcoder, extension_of};

/// Per-run conversion knobs, resolved from settings and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub mode: TranscodeMode,
    /// 0 means "one per available CPU".
    pub jobs: usize,
    pub on_failure: FailurePolicy,
}

impl From<&ConvertSettings> for ConvertOptions {
    fn from(s: &ConvertSettings) -> Self {
        Self {
            mode: s.mode,
            jobs: s.jobs,
            on_failure: s.on_failure,
        }
    }
}

/// What happened to each track of one album.
#[derive(Debug)]
pub struct AlbumReport {
    pub album: String,
    pub directory: PathBuf,
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, Error)>,
    /// Tracks never started because an earlier one failed.
    pub skipped: usize,
}

impl AlbumReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len() + self.skipped
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped == 0
    }
}

/// Plan one transcoder run per track of `album`, writing into `album_dir`.
pub fn plan_jobs(
    album: &Album,
    src_dir: &Path,
    album_dir: &Path,
    mode: TranscodeMode,
) -> Vec<TrackJob> {
    album
        .tracks
        .iter()
        .map(|track| {
            let source = src_dir.join(&track.filename);
            let plan = TranscodePlan::build(mode, &extension_of(&source), track, album);
            let destination = album_dir.join(&plan.file_name);
            let args = plan.args(&source, &destination);
            debug!(
                "track {}: {} -> {} (copy: {})",
                track.num,
                source.display(),
                destination.display(),
                plan.copy
            );
            TrackJob {
                num: track.num,
                source,
                destination,
                args,
            }
        })
        .collect()
}

/// Convert one album whose document lives in `src_dir` into `dst_root`.
///
/// With [`FailurePolicy::Abort`] the first failing track is returned as the
/// error once in-flight tracks have finished. With
/// [`FailurePolicy::KeepGoing`] every track runs and failures are listed in
/// the report. Output already written is left in place either way.
pub fn convert_album(
    album: &Album,
    src_dir: &Path,
    dst_root: &Path,
    options: &ConvertOptions,
    transcoder: &dyn Transcoder,
    console: &Console,
) -> Result<AlbumReport> {
    album.validate().map_err(|reason| Error::InvalidMetadata {
        path: src_dir.to_path_buf(),
        reason,
    })?;

    debug!("{album:#?}");

    let album_dir = prepare_album_dir(album, dst_root)?;
    if let Some(cover) = album.cover_art.as_deref() {
        copy_cover(&src_dir.join(cover), &album_dir)?;
    }

    let jobs = plan_jobs(album, src_dir, &album_dir, options.mode);
    let total = jobs.len();
    let workers = worker_count(options.jobs, total);
    info!(
        "{} - {}: {total} tracks, mode {}, {workers} workers",
        album.album_artist(),
        album.title(),
        options.mode
    );

    let outcomes = pool::run_jobs(jobs, workers, options.on_failure, transcoder, console);

    let mut report = AlbumReport {
        album: album.title().to_string(),
        directory: album_dir,
        succeeded: Vec::new(),
        failed: Vec::new(),
        skipped: total - outcomes.len(),
    };
    for outcome in outcomes {
        match outcome.result {
            Ok(()) => report.succeeded.push(outcome.destination),
            Err(e) => {
                warn!("track {} ({}) failed: {e}", outcome.num, outcome.source.display());
                report.failed.push((outcome.source, e));
            }
        }
    }

    if options.on_failure == FailurePolicy::Abort && !report.failed.is_empty() {
        let (_, first) = report.failed.remove(0);
        return Err(first);
    }

    Ok(report)
}

#[cfg(test)]
mod tests;
