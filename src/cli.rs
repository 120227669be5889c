//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::ProberKind;
use crate::transcode::TranscodeMode;

#[derive(Debug, Parser)]
#[command(name = "albumize", version)]
#[command(
    about = "Build a tagged, neatly named music library from album metadata files",
    long_about = None
)]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Transcode and tag collections into a destination library
    Convert {
        #[command(subcommand)]
        target: ConvertTarget,
    },

    /// Write an album.toml for a directory of audio files
    Init(InitArgs),
}

#[derive(Debug, Subcommand)]
pub enum ConvertTarget {
    /// Convert the album described by <SRC>/album.toml
    Album(ConvertArgs),

    /// Convert every single in <SRC>/singles.toml
    Singles(ConvertArgs),

    /// Convert every album.toml and singles.toml below <SRC>
    All(ConvertArgs),
}

impl ConvertTarget {
    pub fn args(&self) -> &ConvertArgs {
        match self {
            ConvertTarget::Album(a) | ConvertTarget::Singles(a) | ConvertTarget::All(a) => a,
        }
    }
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Root of the destination library
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Directory holding the metadata file(s) and source audio
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub src: PathBuf,

    /// Container policy: dwebble, mp3, opus or map
    #[arg(short, long)]
    pub mode: Option<TranscodeMode>,

    /// Concurrent transcoder processes per album (0 = one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Run every track even after one fails, then report all failures
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory of audio files to describe
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Where to write the document [default: <DIR>/album.toml]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Comma-separated genres for tracks without a genre tag
    #[arg(long, default_value = "")]
    pub genres: String,

    /// Comma-separated tags added to every track
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Release year for every track, overriding date tags
    #[arg(long)]
    pub year: Option<u32>,

    /// Tag reader: ffprobe or lofty
    #[arg(long, value_parser = parse_prober)]
    pub prober: Option<ProberKind>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

fn parse_prober(value: &str) -> Result<ProberKind, String> {
    match value.to_ascii_lowercase().as_str() {
        "ffprobe" => Ok(ProberKind::Ffprobe),
        "lofty" => Ok(ProberKind::Lofty),
        _ => Err(format!("expected `ffprobe` or `lofty`, got {value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn convert_album_flags() {
        let cli = Cli::try_parse_from([
            "albumize", "-vv", "convert", "album", "/music", "-s", "rips", "-m", "opus", "-j",
            "3", "--keep-going",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let Command::Convert { target } = cli.command else {
            panic!("expected convert");
        };
        assert!(matches!(target, ConvertTarget::Album(_)));
        let args = target.args();
        assert_eq!(args.dest, PathBuf::from("/music"));
        assert_eq!(args.src, PathBuf::from("rips"));
        assert_eq!(args.mode, Some(TranscodeMode::ForceOpus));
        assert_eq!(args.jobs, Some(3));
        assert!(args.keep_going);
    }

    #[test]
    fn convert_defaults_leave_settings_in_charge() {
        let cli = Cli::try_parse_from(["albumize", "convert", "all", "out"]).unwrap();
        let Command::Convert { target } = cli.command else {
            panic!("expected convert");
        };
        let args = target.args();
        assert_eq!(args.src, PathBuf::from("."));
        assert_eq!(args.mode, None);
        assert_eq!(args.jobs, None);
        assert!(!args.keep_going);
    }

    #[test]
    fn unknown_mode_is_rejected_before_any_work() {
        assert!(Cli::try_parse_from(["albumize", "convert", "album", "out", "-m", "aac"]).is_err());
    }

    #[test]
    fn init_flags() {
        let cli = Cli::try_parse_from([
            "albumize",
            "init",
            "-d",
            "rips/kid-a",
            "--genres",
            "Rock, Electronic",
            "--year",
            "2000",
            "--prober",
            "lofty",
            "--force",
            "--config",
            "alt.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));

        let Command::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.dir, PathBuf::from("rips/kid-a"));
        assert_eq!(args.output, None);
        assert_eq!(args.genres, "Rock, Electronic");
        assert_eq!(args.tags, "");
        assert_eq!(args.year, Some(2000));
        assert_eq!(args.prober, Some(ProberKind::Lofty));
        assert!(args.force);
    }
}
