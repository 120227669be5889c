use std::io::{self, Write};
use std::sync::Mutex;

/// Line-oriented progress output shared by all workers.
///
/// Each call writes one whole line while holding the lock, so lines from
/// concurrent tracks never interleave.
pub struct Console {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn line(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Progress output is best effort; a closed stdout must not fail a track.
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}
