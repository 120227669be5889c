use std::ffi::OsString;

use crate::error::Result;
use crate::process::run_capture;

/// Something that can execute a transcoder argument list.
///
/// The batch orchestrator only talks to this trait so it can be driven
/// without a real transcoder.
pub trait Transcoder: Sync {
    fn transcode(&self, args: &[OsString]) -> Result<()>;
}

/// Runs the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: String,
}

impl Ffmpeg {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Transcoder for Ffmpeg {
    fn transcode(&self, args: &[OsString]) -> Result<()> {
        run_capture(&self.program, args).map(|_| ())
    }
}
