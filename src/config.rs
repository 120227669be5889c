//! Configuration loader and schema types.
//!
//! Application settings steer how albums are converted and how source
//! directories are scanned. They are separate from the per-album
//! `album.toml` / `singles.toml` documents handled by `metadata`.

mod load;
mod schema;

pub(crate) use load::normalized_extensions;
pub use load::resolve_config_path;
pub use schema::*;
