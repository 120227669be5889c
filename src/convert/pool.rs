use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, mpsc};
use std::thread;

use super::console::Console;
use crate::config::FailurePolicy;
use crate::error::Result;
use crate::transcode::Transcoder;

/// One planned transcoder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackJob {
    pub num: u32,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub args: Vec<OsString>,
}

/// Result of running one [`TrackJob`].
#[derive(Debug)]
pub struct TrackOutcome {
    pub num: u32,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub result: Result<()>,
}

/// Number of workers for `tracks` jobs: `jobs`, or the available CPUs when
/// `jobs` is 0, capped by the track count and never below one.
pub fn worker_count(jobs: usize, tracks: usize) -> usize {
    let wanted = if jobs == 0 {
        thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    } else {
        jobs
    };
    wanted.min(tracks).max(1)
}

/// Run `jobs` on `workers` threads and collect their outcomes in track order.
///
/// Under [`FailurePolicy::Abort`] a failure stops workers from picking up
/// new jobs; jobs already running finish normally. Jobs that never started
/// have no outcome.
pub(super) fn run_jobs(
    jobs: Vec<TrackJob>,
    workers: usize,
    policy: FailurePolicy,
    transcoder: &dyn Transcoder,
    console: &Console,
) -> Vec<TrackOutcome> {
    let (job_tx, job_rx) = mpsc::channel::<TrackJob>();
    for job in jobs {
        // The receiver is alive until the end of this function.
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let job_rx = Mutex::new(job_rx);
    let (done_tx, done_rx) = mpsc::channel::<TrackOutcome>();
    let stop = AtomicBool::new(false);

    thread::scope(|s| {
        for _ in 0..workers {
            let done_tx = done_tx.clone();
            let job_rx = &job_rx;
            let stop = &stop;

            s.spawn(move || {
                loop {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    let next = match job_rx.lock() {
                        Ok(rx) => rx.recv(),
                        Err(_) => break,
                    };
                    let Ok(job) = next else {
                        break;
                    };

                    console.line(&format!("Processing: {}", job.source.display()));
                    let result = transcoder.transcode(&job.args);
                    match &result {
                        Ok(()) => {
                            console.line(&format!("Done Processing: {}", job.source.display()))
                        }
                        Err(_) => {
                            console.line(&format!("Failed: {}", job.source.display()));
                            if policy == FailurePolicy::Abort {
                                stop.store(true, Ordering::SeqCst);
                            }
                        }
                    }

                    let outcome = TrackOutcome {
                        num: job.num,
                        source: job.source,
                        destination: job.destination,
                        result,
                    };
                    if done_tx.send(outcome).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(done_tx);

    let mut outcomes: Vec<TrackOutcome> = done_rx.into_iter().collect();
    outcomes.sort_by_key(|o| o.num);
    outcomes
}
