//! Transcode policy: which container a track ends up in, whether the audio
//! stream is copied or re-encoded, which tags are written, and the exact
//! argument list handed to the transcoder.
//!
//! Everything except [`Ffmpeg`] is pure and never touches disk.

mod mode;
mod plan;
mod runner;

pub use mode::TranscodeMode;
pub use plan::*;
pub use runner::{Ffmpeg, Transcoder};
