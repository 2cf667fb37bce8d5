//! Run an engine command to completion and capture its output.
use std::process::Stdio;

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
    sync::mpsc,
};
use tracing::{debug, trace};

use kiln_core::{EngineFailure, EngineResult};

use crate::output::{OutputLogConfig, Stream};

/// Spawn `cmd`, wait for it and return stdout and stderr interleaved in arrival order.
///
/// Non-zero exit codes and signal termination become [`EngineFailure`]s carrying
/// everything the process printed. There is no timeout: the call returns when the
/// process exits. The child is not killed if the returned future is dropped.
pub async fn run_captured(mut cmd: Command, step: &str, log: &OutputLogConfig) -> EngineResult {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(false);

    trace!(step, command = ?cmd.as_std(), "spawning engine command");

    let mut child = cmd
        .spawn()
        .map_err(|e| EngineFailure::new(format!("spawn failed: {e}"), String::new()))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| EngineFailure::new("stdout was not captured", String::new()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| EngineFailure::new("stderr was not captured", String::new()))?;

    let (tx, mut rx) = mpsc::unbounded_channel::<(Stream, String)>();
    let collect = async {
        let mut combined = String::new();
        while let Some((stream, line)) = rx.recv().await {
            log.emit(step, stream, &line);
            combined.push_str(&line);
        }
        combined
    };
    let ((), (), combined) = tokio::join!(
        pump(stdout, Stream::Stdout, tx.clone()),
        pump(stderr, Stream::Stderr, tx),
        collect
    );

    let status = child
        .wait()
        .await
        .map_err(|e| EngineFailure::new(format!("wait failed: {e}"), combined.clone()))?;

    if status.success() {
        debug!(step, "engine command exited successfully");
        return Ok(combined);
    }
    let reason = match status.code() {
        Some(code) => format!("process exited with non-zero code: {code}"),
        None => "process terminated by signal".to_string(),
    };
    Err(EngineFailure::new(reason, combined))
}

/// Forward lines from one pipe until EOF.
async fn pump<R>(reader: R, stream: Stream, tx: mpsc::UnboundedSender<(Stream, String)>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).into_owned();
                if tx.send((stream, line)).is_err() {
                    break;
                }
            }
            Err(e) => {
                debug!(?stream, "failed to read engine output: {e}");
                break;
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[tokio::test]
    async fn captures_both_streams_on_success() {
        let out = run_captured(
            sh("echo building; echo warning >&2; echo done"),
            "build",
            &OutputLogConfig::default(),
        )
        .await
        .unwrap();

        assert!(out.contains("building\n"));
        assert!(out.contains("warning\n"));
        assert!(out.contains("done\n"));
        assert!(out.find("building").unwrap() < out.find("done").unwrap());
    }

    #[tokio::test]
    async fn non_zero_exit_is_a_failure_with_output() {
        let err = run_captured(
            sh("echo 'E: Unable to locate package nosuchpkg' >&2; exit 100"),
            "build",
            &OutputLogConfig::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.reason, "process exited with non-zero code: 100");
        assert_eq!(err.output, "E: Unable to locate package nosuchpkg\n");
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let cmd = Command::new("/nonexistent/kiln-engine-binary");
        let err = run_captured(cmd, "push", &OutputLogConfig::default())
            .await
            .unwrap_err();
        assert!(err.reason.starts_with("spawn failed"));
        assert!(err.output.is_empty());
    }

    #[tokio::test]
    async fn output_without_trailing_newline_is_kept() {
        let out = run_captured(sh("printf partial"), "push", &OutputLogConfig::default())
            .await
            .unwrap();
        assert_eq!(out, "partial");
    }
}
