use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::cli::{ConvertTarget, InitArgs};
use crate::config::{FailurePolicy, Settings};
use crate::convert::{Console, ConvertOptions, convert_album};
use crate::error::{Error, Result};
use crate::library::{InitOptions, discover, find_cover, list_tracks, split_list, synthesize_album};
use crate::metadata::{ALBUM_FILE, Album, SINGLES_FILE, Singles};
use crate::probe;
use crate::transcode::{Ffmpeg, Transcoder};

/// A collection that did not convert cleanly.
#[derive(Debug)]
struct Failure {
    name: String,
    failed_tracks: usize,
    total_tracks: usize,
}

/// Runs collections one after another and tallies what went wrong.
pub(super) struct Batch<'a> {
    options: ConvertOptions,
    dest: &'a Path,
    transcoder: &'a dyn Transcoder,
    console: &'a Console,
    attempted: usize,
    failures: Vec<Failure>,
}

impl<'a> Batch<'a> {
    pub(super) fn new(
        options: ConvertOptions,
        dest: &'a Path,
        transcoder: &'a dyn Transcoder,
        console: &'a Console,
    ) -> Self {
        Self {
            options,
            dest,
            transcoder,
            console,
            attempted: 0,
            failures: Vec::new(),
        }
    }

    fn keep_going(&self) -> bool {
        self.options.on_failure == FailurePolicy::KeepGoing
    }

    /// Under keep-going a collection-level error is logged and counted
    /// instead of ending the run.
    fn settle(&mut self, name: &str, result: Result<()>) -> Result<()> {
        match result {
            Err(e) if self.keep_going() => {
                error!("{name}: {e}");
                self.failures.push(Failure {
                    name: name.to_string(),
                    failed_tracks: 0,
                    total_tracks: 0,
                });
                Ok(())
            }
            other => other,
        }
    }

    fn album(&mut self, album: &Album, src_dir: &Path) -> Result<()> {
        self.attempted += 1;
        let result = convert_album(
            album,
            src_dir,
            self.dest,
            &self.options,
            self.transcoder,
            self.console,
        );
        let report = match result {
            Ok(report) => report,
            Err(e) => return self.settle(album.title(), Err(e)),
        };

        if report.is_success() {
            info!(
                "{}: {} tracks written to {}",
                report.album,
                report.total(),
                report.directory.display()
            );
        } else {
            warn!(
                "{}: {} of {} tracks failed",
                report.album,
                report.failed.len(),
                report.total()
            );
            self.failures.push(Failure {
                name: report.album.clone(),
                failed_tracks: report.failed.len(),
                total_tracks: report.total(),
            });
        }
        Ok(())
    }

    pub(super) fn album_file(&mut self, path: &Path) -> Result<()> {
        let album = match Album::load(path) {
            Ok(album) => album,
            Err(e) => {
                self.attempted += 1;
                return self.settle(&path.display().to_string(), Err(e));
            }
        };
        self.album(&album, document_dir(path))
    }

    pub(super) fn singles_file(&mut self, path: &Path) -> Result<()> {
        let singles = match Singles::load(path) {
            Ok(singles) => singles,
            Err(e) => {
                self.attempted += 1;
                return self.settle(&path.display().to_string(), Err(e));
            }
        };
        for album in singles.albums() {
            self.album(&album, document_dir(path))?;
        }
        Ok(())
    }

    /// The overall outcome once every collection has been tried.
    pub(super) fn finish(self) -> Result<()> {
        match self.failures.as_slice() {
            [] => Ok(()),
            [only] if only.total_tracks > 0 => Err(Error::TracksFailed {
                album: only.name.clone(),
                failed: only.failed_tracks,
                total: only.total_tracks,
            }),
            failed => Err(Error::CollectionsFailed {
                failed: failed.len(),
                total: self.attempted,
            }),
        }
    }
}

fn document_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// `albumize convert album|singles|all`.
pub fn convert(target: &ConvertTarget, settings: &Settings) -> Result<()> {
    let args = target.args();
    let ffmpeg = Ffmpeg::new(settings.tools.ffmpeg.clone());
    let console = Console::stdout();
    let options = ConvertOptions::from(&settings.convert);
    let mut batch = Batch::new(options, &args.dest, &ffmpeg, &console);

    match target {
        ConvertTarget::Album(_) => batch.album_file(&args.src.join(ALBUM_FILE))?,
        ConvertTarget::Singles(_) => batch.singles_file(&args.src.join(SINGLES_FILE))?,
        ConvertTarget::All(_) => convert_all(&mut batch, &args.src, settings)?,
    }

    batch.finish()
}

fn convert_all(batch: &mut Batch<'_>, root: &Path, settings: &Settings) -> Result<()> {
    let found = discover(root, &settings.scan);
    if found.is_empty() {
        warn!(
            "no {ALBUM_FILE} or {SINGLES_FILE} found under {}",
            root.display()
        );
        return Ok(());
    }
    info!(
        "found {} albums and {} singles collections under {}",
        found.albums.len(),
        found.singles.len(),
        root.display()
    );

    for path in &found.albums {
        batch.album_file(path)?;
    }
    for path in &found.singles {
        batch.singles_file(path)?;
    }
    Ok(())
}

/// `albumize init`.
pub fn init(args: &InitArgs, settings: &Settings) -> Result<()> {
    let output: PathBuf = args
        .output
        .clone()
        .unwrap_or_else(|| args.dir.join(ALBUM_FILE));
    if output.exists() && !args.force {
        return Err(Error::AlreadyExists(output));
    }

    let files = list_tracks(&args.dir, &settings.scan)?;
    if files.is_empty() {
        warn!("no track files found in {}", args.dir.display());
    }
    let cover = find_cover(&args.dir, &settings.scan)?;

    let prober = probe::from_settings(settings);
    let options = InitOptions {
        genres: split_list(&args.genres),
        tags: split_list(&args.tags),
        year: args.year,
    };
    let album = synthesize_album(&files, cover, prober.as_ref(), &options)?;

    if let Err(reason) = album.validate() {
        warn!("{}: {reason}; fill it in before converting", output.display());
    }
    album.save(&output)?;
    info!("wrote {} ({} tracks)", output.display(), album.tracks.len());
    Ok(())
}
