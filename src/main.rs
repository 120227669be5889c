use std::process::ExitCode;

mod cli;
mod config;
mod convert;
mod error;
mod library;
mod metadata;
mod probe;
mod process;
mod runtime;
mod sanitize;
mod transcode;

fn main() -> ExitCode {
    match runtime::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
