//! Running external tools.

use std::ffi::OsStr;
use std::process::{Command, Stdio};

use tracing::trace;

use crate::error::{Error, Result};

/// Lines of stderr kept in a failure message.
const STDERR_TAIL_LINES: usize = 12;

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

fn display_args<S: AsRef<OsStr>>(args: &[S]) -> String {
    args.iter()
        .map(|a| a.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` to completion with no stdin and return its stdout.
///
/// A spawn failure or a non-zero exit status is an error; the error keeps
/// the tail of stderr so the cause shows up in the log.
pub fn run_capture<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<Vec<u8>> {
    trace!("{program} {}", display_args(args));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| Error::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(Error::ToolFailed {
            program: program.to_string(),
            args: display_args(args),
            status: output.status,
            stderr: stderr_tail(&output.stderr),
        });
    }

    Ok(output.stdout)
}
