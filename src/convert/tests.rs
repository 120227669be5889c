use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::tempdir;

use super::*;
use crate::error::Error;
use crate::metadata::{Album, Track};

/// Records every argument list it is asked to run; fails for sources whose
/// file name contains `fail_on`.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Vec<String>>>,
    fail_on: Option<&'static str>,
}

impl Recorder {
    fn failing_on(marker: &'static str) -> Self {
        Self {
            fail_on: Some(marker),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

impl Transcoder for Recorder {
    fn transcode(&self, args: &[OsString]) -> crate::error::Result<()> {
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        let file_name = Path::new(&args[1])
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let fail = self.fail_on.is_some_and(|m| file_name.contains(m));
        self.calls.lock().unwrap().push(args);
        if fail {
            return Err(Error::Spawn {
                program: "ffmpeg".into(),
                source: io::Error::other("boom"),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn track(num: u32, filename: &str, name: &str) -> Track {
    Track {
        filename: filename.into(),
        num,
        name: name.into(),
        ..Track::default()
    }
}

fn album(tracks: Vec<Track>) -> Album {
    Album {
        album: "Discovery".into(),
        artist: "Daft Punk".into(),
        cover_art: None,
        tracks,
    }
}

fn options(mode: TranscodeMode, jobs: usize, on_failure: FailurePolicy) -> ConvertOptions {
    ConvertOptions {
        mode,
        jobs,
        on_failure,
    }
}

#[test]
fn two_track_album_to_mp3_runs_two_invocations() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let album = album(vec![
        track(1, "one.mp3", "One More Time"),
        track(2, "two.flac", "Aerodynamic"),
    ]);
    let recorder = Recorder::default();
    let out = SharedBuf::default();

    let report = convert_album(
        &album,
        src.path(),
        dst.path(),
        &options(TranscodeMode::ForceMp3, 0, FailurePolicy::Abort),
        &recorder,
        &Console::new(out.clone()),
    )
    .unwrap();

    let calls = recorder.calls();
    assert_eq!(calls.len(), 2);

    let album_dir = dst.path().join("Daft Punk").join("Discovery");
    for call in &calls {
        assert!(call.last().unwrap().ends_with(".mp3"));
        let copies = call.windows(2).any(|w| w[0] == "-codec" && w[1] == "copy");
        assert_eq!(copies, call[1].ends_with(".mp3"), "{call:?}");
    }
    assert_eq!(
        calls[0].last().unwrap(),
        &album_dir.join("01 - One More Time.mp3").to_string_lossy()
    );
    assert_eq!(
        calls[1].last().unwrap(),
        &album_dir.join("02 - Aerodynamic.mp3").to_string_lossy()
    );

    assert!(report.is_success());
    assert_eq!(report.total(), 2);
    assert_eq!(report.directory, album_dir);
    assert!(album_dir.is_dir());

    let text = out.text();
    assert_eq!(text.lines().filter(|l| l.starts_with("Processing: ")).count(), 2);
    assert_eq!(text.lines().filter(|l| l.starts_with("Done Processing: ")).count(), 2);
}

#[test]
fn sanitized_names_leave_override_markers() {
    let dst = tempdir().unwrap();
    let mut album = album(Vec::new());
    album.artist = "AC/DC".into();
    album.album = "Who Made Who?".into();

    let dir = prepare_album_dir(&album, dst.path()).unwrap();

    assert_eq!(dir, dst.path().join("ACDC").join("Who Made Who"));
    assert_eq!(
        fs::read_to_string(dst.path().join("ACDC").join(OVERRIDE_FILE)).unwrap(),
        "AC/DC"
    );
    assert_eq!(
        fs::read_to_string(dir.join(OVERRIDE_FILE)).unwrap(),
        "Who Made Who?"
    );

    // Running again over existing directories is fine.
    assert_eq!(prepare_album_dir(&album, dst.path()).unwrap(), dir);
}

#[test]
fn clean_names_get_no_override_marker() {
    let dst = tempdir().unwrap();
    let dir = prepare_album_dir(&album(Vec::new()), dst.path()).unwrap();
    assert!(!dir.join(OVERRIDE_FILE).exists());
    assert!(!dst.path().join("Daft Punk").join(OVERRIDE_FILE).exists());
}

#[test]
fn names_that_sanitize_to_nothing_are_rejected() {
    let dst = tempdir().unwrap();
    let mut album = album(Vec::new());
    album.album = "???".into();
    assert!(matches!(
        prepare_album_dir(&album, dst.path()),
        Err(Error::InvalidMetadata { .. })
    ));
}

#[test]
fn cover_art_is_copied_with_its_extension() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::write(src.path().join("front.JPG"), b"jpeg bytes").unwrap();

    let mut album = album(vec![track(1, "a.flac", "A")]);
    album.cover_art = Some("front.JPG".into());

    let report = convert_album(
        &album,
        src.path(),
        dst.path(),
        &options(TranscodeMode::IdentityMap, 1, FailurePolicy::Abort),
        &Recorder::default(),
        &Console::new(io::sink()),
    )
    .unwrap();

    assert_eq!(fs::read(report.directory.join("cover.JPG")).unwrap(), b"jpeg bytes");
}

#[test]
fn missing_cover_art_is_an_error() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let mut album = album(vec![track(1, "a.flac", "A")]);
    album.cover_art = Some("nope.png".into());

    let recorder = Recorder::default();
    let err = convert_album(
        &album,
        src.path(),
        dst.path(),
        &options(TranscodeMode::IdentityMap, 1, FailurePolicy::Abort),
        &recorder,
        &Console::new(io::sink()),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(recorder.calls().is_empty());
}

#[test]
fn copy_cover_rejects_directories() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    assert!(matches!(
        copy_cover(src.path(), dst.path()),
        Err(Error::NotAFile(_))
    ));
}

#[test]
fn invalid_album_fails_before_touching_disk() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let mut album = album(vec![track(1, "a.flac", "A"), track(1, "b.flac", "B")]);
    album.artist = "Someone".into();

    let err = convert_album(
        &album,
        src.path(),
        dst.path(),
        &options(TranscodeMode::IdentityMap, 1, FailurePolicy::Abort),
        &Recorder::default(),
        &Console::new(io::sink()),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidMetadata { .. }));
    assert!(!dst.path().join("Someone").exists());
}

#[test]
fn abort_policy_returns_first_error() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let album = album(vec![track(1, "bad.flac", "Bad"), track(2, "good.flac", "Good")]);

    let err = convert_album(
        &album,
        src.path(),
        dst.path(),
        &options(TranscodeMode::IdentityMap, 2, FailurePolicy::Abort),
        &Recorder::failing_on("bad"),
        &Console::new(io::sink()),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Spawn { .. }));
}

#[test]
fn abort_policy_stops_handing_out_jobs() {
    let album = album(vec![
        track(1, "bad.flac", "Bad"),
        track(2, "b.flac", "B"),
        track(3, "c.flac", "C"),
    ]);
    let jobs = plan_jobs(&album, Path::new("/src"), Path::new("/dst"), TranscodeMode::IdentityMap);
    let recorder = Recorder::failing_on("bad");

    let outcomes = pool::run_jobs(
        jobs,
        1,
        FailurePolicy::Abort,
        &recorder,
        &Console::new(io::sink()),
    );

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].result.is_err());
    assert_eq!(recorder.calls().len(), 1);
}

#[test]
fn keep_going_policy_reports_every_track() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let album = album(vec![
        track(1, "a.flac", "A"),
        track(2, "bad.flac", "Bad"),
        track(3, "c.flac", "C"),
    ]);
    let out = SharedBuf::default();

    let report = convert_album(
        &album,
        src.path(),
        dst.path(),
        &options(TranscodeMode::IdentityMap, 3, FailurePolicy::KeepGoing),
        &Recorder::failing_on("bad"),
        &Console::new(out.clone()),
    )
    .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.skipped, 0);
    assert!(report.failed[0].0.ends_with("bad.flac"));
    assert!(out.text().lines().any(|l| l.starts_with("Failed: ")));
}

#[test]
fn worker_count_is_bounded_by_tracks_and_at_least_one() {
    assert_eq!(worker_count(4, 10), 4);
    assert_eq!(worker_count(4, 2), 2);
    assert_eq!(worker_count(4, 0), 1);
    assert!(worker_count(0, 64) >= 1);
    assert!(worker_count(0, 64) <= 64);
}

#[test]
fn progress_lines_never_interleave() {
    let album = album((1..=24).map(|n| track(n, &format!("{n}.flac"), "x")).collect());
    let jobs = plan_jobs(&album, Path::new("/src"), Path::new("/dst"), TranscodeMode::IdentityMap);
    let out = SharedBuf::default();

    let outcomes = pool::run_jobs(
        jobs,
        8,
        FailurePolicy::KeepGoing,
        &Recorder::default(),
        &Console::new(out.clone()),
    );

    assert_eq!(outcomes.len(), 24);
    let nums: Vec<u32> = outcomes.iter().map(|o| o.num).collect();
    assert_eq!(nums, (1..=24).collect::<Vec<_>>());

    let text = out.text();
    assert_eq!(text.lines().count(), 48);
    assert!(
        text.lines()
            .all(|l| l.starts_with("Processing: /src/") || l.starts_with("Done Processing: /src/"))
    );
}
