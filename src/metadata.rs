//! Album and singles documents (`album.toml` / `singles.toml`).
//!
//! These describe what a converted collection should look like: names,
//! track order, per-track tags and which source file feeds each track.

mod load;
mod model;

pub use load::{ALBUM_FILE, SINGLES_FILE};
pub use model::*;
