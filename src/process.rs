use std::path::Path;
use std::process::Stdio;

use log::debug;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Captured output of one finished external command
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run an external command to completion and capture its output.
///
/// Both pipes are drained concurrently before the exit status is read, so a
/// chatty tool can't deadlock on a full buffer. A non-zero exit maps to
/// [`Error::CommandFailed`]; stdout and stderr are returned verbatim.
pub async fn run(program: &Path, args: &[&str]) -> Result<CommandOutput> {
    debug!("Running {} {}", program.display(), args.join(" "));

    let output = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        return Err(Error::CommandFailed {
            program: program.display().to_string(),
            exit_code: output.status.code(),
            stderr,
        });
    }

    Ok(CommandOutput { stdout, stderr })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let out = run(Path::new("/bin/sh"), &["-c", "printf hello"]).await.unwrap();
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.stderr, "");
    }

    #[tokio::test]
    async fn test_run_nonzero_exit() {
        let err = run(Path::new("/bin/sh"), &["-c", "echo oops >&2; exit 3"])
            .await
            .unwrap_err();
        match err {
            Error::CommandFailed { exit_code, stderr, .. } => {
                assert_eq!(exit_code, Some(3));
                assert_eq!(stderr.trim(), "oops");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let err = run(Path::new("/no/such/binary"), &[]).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
