use std::path::Path;

use tracing::warn;

use crate::cli::Command;
use crate::config::{FailurePolicy, Settings, resolve_config_path};

/// Load settings, falling back to defaults when the file is unreadable or invalid.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let path = explicit.map(Path::to_path_buf).or_else(resolve_config_path);
    match Settings::load_from(path.as_deref()) {
        Ok(s) => {
            if let Err(e) = s.validate() {
                warn!("invalid config, using defaults: {e}");
                Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent a run.
            warn!("failed to load config, using defaults: {e}");
            Settings::default()
        }
    }
}

/// Fold command-line flags over the loaded settings.
pub fn apply_overrides(settings: &mut Settings, command: &Command) {
    match command {
        Command::Convert { target } => {
            let args = target.args();
            if let Some(mode) = args.mode {
                settings.convert.mode = mode;
            }
            if let Some(jobs) = args.jobs {
                settings.convert.jobs = jobs;
            }
            if args.keep_going {
                settings.convert.on_failure = FailurePolicy::KeepGoing;
            }
        }
        Command::Init(args) => {
            if let Some(prober) = args.prober {
                settings.scan.prober = prober;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;
    use crate::config::ProberKind;
    use crate::transcode::TranscodeMode;

    fn overridden(argv: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut settings = Settings::default();
        apply_overrides(&mut settings, &cli.command);
        settings
    }

    #[test]
    fn convert_flags_win_over_settings() {
        let s = overridden(&[
            "albumize",
            "convert",
            "singles",
            "out",
            "-m",
            "mp3",
            "-j",
            "2",
            "--keep-going",
        ]);
        assert_eq!(s.convert.mode, TranscodeMode::ForceMp3);
        assert_eq!(s.convert.jobs, 2);
        assert_eq!(s.convert.on_failure, FailurePolicy::KeepGoing);
    }

    #[test]
    fn absent_flags_keep_settings() {
        let s = overridden(&["albumize", "convert", "album", "out"]);
        assert_eq!(s.convert.mode, TranscodeMode::PassthroughMatchingContainer);
        assert_eq!(s.convert.jobs, 0);
        assert_eq!(s.convert.on_failure, FailurePolicy::Abort);
    }

    #[test]
    fn init_prober_flag_selects_backend() {
        let s = overridden(&["albumize", "init", "--prober", "lofty"]);
        assert_eq!(s.scan.prober, ProberKind::Lofty);
    }

    #[test]
    fn broken_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tools]\nffmpeg = \"\"\n").unwrap();

        let s = load_settings(Some(&path));
        assert_eq!(s.tools.ffmpeg, "ffmpeg");
    }
}
