use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;
use crate::error::{Error, Result};

/// Configuration loading helpers.
///
/// `Settings::load_from` layers environment variables (prefix `ALBUMIZE__`) over an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and an explicit (optional) config file.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ALBUMIZE")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("scan.track_extensions")
                .with_list_parse_key("scan.cover_extensions"),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<()> {
        if self.tools.ffmpeg.trim().is_empty() {
            return Err(Error::InvalidSettings("tools.ffmpeg must not be empty".into()));
        }
        if self.tools.ffprobe.trim().is_empty() {
            return Err(Error::InvalidSettings("tools.ffprobe must not be empty".into()));
        }
        if normalized_extensions(&self.scan.track_extensions).is_empty() {
            return Err(Error::InvalidSettings(
                "scan.track_extensions must list at least one extension".into(),
            ));
        }
        if normalized_extensions(&self.scan.cover_extensions).is_empty() {
            return Err(Error::InvalidSettings(
                "scan.cover_extensions must list at least one extension".into(),
            ));
        }
        Ok(())
    }
}

/// Lowercase, dot-less, non-empty extensions.
pub(crate) fn normalized_extensions(exts: &[String]) -> Vec<String> {
    exts.iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Resolve the config path from `ALBUMIZE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ALBUMIZE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/albumize/config.toml`
/// or `~/.config/albumize/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("albumize").join("config.toml"))
}
