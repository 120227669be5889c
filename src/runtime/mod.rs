use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::Result;

mod commands;
mod settings;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = settings::load_settings(cli.config.as_deref());
    settings::apply_overrides(&mut settings, &cli.command);
    debug!("{settings:#?}");

    match &cli.command {
        Command::Convert { target } => commands::convert(target, &settings),
        Command::Init(args) => commands::init(args, &settings),
    }
}

/// Logs go to stderr so progress lines on stdout stay clean.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
