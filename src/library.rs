//! Finding things on disk: collection documents to convert, and the audio
//! files and cover art `init` builds a new `album.toml` from.

mod discover;
mod scan;
mod synth;

pub use discover::discover;
pub use scan::{find_cover, list_tracks};
pub use synth::{InitOptions, split_list, synthesize_album};
