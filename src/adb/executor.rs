/*!
Executor / classifier.

Spawns the built `CommandLine` directly (argv, no shell), buffers both streams, and turns
the process outcome into an `ExecutionResult`:

  spawn error                    -> Spawn
  cancellation future fired      -> Cancelled (child killed, pipes dropped)
  exit != 0  OR  stderr non-empty -> Tool (stderr verbatim)
  otherwise                      -> Ok(stdout verbatim, possibly empty)

adb sometimes reports errors on stderr with exit code 0, so stderr presence alone is a
failure. Benign warnings are over-reported as a consequence.
*/

use std::future::Future;
use std::process::{Output, Stdio};

use tokio::process::Command;

use super::builder::CommandLine;
use super::DispatchError;

/// stdout on success; typed failure otherwise.
pub type ExecutionResult = Result<String, DispatchError>;

/// Run `cmd` once. Resolving `cancel` before the child exits terminates it.
///
/// No retries and no internal timeout; both belong to the caller.
pub async fn execute<C>(cmd: &CommandLine, cancel: C) -> ExecutionResult
where
    C: Future<Output = ()>,
{
    let child = Command::new(cmd.program())
        .args(cmd.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| DispatchError::Spawn {
            program: cmd.program().to_string(),
            source,
        })?;

    // Dropping `wait_with_output` on cancellation drops the child, which kills it.
    let output = tokio::select! {
        out = child.wait_with_output() => out.map_err(|e| DispatchError::Tool {
            stderr: format!("failed to collect adb output: {e}"),
            status: None,
        })?,
        _ = cancel => return Err(DispatchError::Cancelled),
    };

    classify(output)
}

/// Pure classification of a finished process.
pub fn classify(output: Output) -> ExecutionResult {
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() || !stderr.is_empty() {
        return Err(DispatchError::Tool {
            stderr,
            status: Some(output.status),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::adb::error::ErrorKind;
    use std::os::unix::process::ExitStatusExt;
    use std::time::{Duration, Instant};

    fn sh(script: &str) -> CommandLine {
        CommandLine::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    fn output(code: i32, stdout: &str, stderr: &str) -> Output {
        Output {
            status: std::process::ExitStatus::from_raw(code << 8),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn classify_success_keeps_stdout_verbatim() {
        let got = classify(output(0, "  List of devices attached\n\n", "")).unwrap();
        assert_eq!(got, "  List of devices attached\n\n");
    }

    #[test]
    fn classify_empty_stdout_is_success() {
        assert_eq!(classify(output(0, "", "")).unwrap(), "");
    }

    #[test]
    fn classify_stderr_on_zero_exit_is_failure() {
        let err = classify(output(0, "partial\n", "warning: something odd\n")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Tool);
        assert_eq!(err.to_string(), "warning: something odd\n");
    }

    #[test]
    fn classify_nonzero_exit_without_stderr() {
        let err = classify(output(1, "", "")).unwrap_err();
        assert_eq!(err.to_string(), "adb process failed (exit status 1)");
    }

    #[tokio::test]
    async fn execute_passes_argv_without_shell_interpretation() {
        let tricky = "a b; echo injected `id` $(whoami) 'q' \"dq\"";
        let cmd = CommandLine::new(
            "sh",
            vec![
                "-c".to_string(),
                r#"printf '%s' "$1""#.to_string(),
                "sh".to_string(),
                tricky.to_string(),
            ],
        );
        let out = execute(&cmd, std::future::pending()).await.unwrap();
        assert_eq!(out, tricky);
    }

    #[tokio::test]
    async fn execute_reports_tool_failure_with_stderr() {
        let err = execute(&sh("echo 'error: no devices/emulators found' >&2; exit 1"), std::future::pending())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Tool);
        assert_eq!(err.to_string(), "error: no devices/emulators found\n");
    }

    #[tokio::test]
    async fn execute_missing_binary_is_spawn_error() {
        let cmd = CommandLine::new("/definitely/not/here/adb", vec!["devices".to_string()]);
        let err = execute(&cmd, std::future::pending()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Spawn);
        assert!(err.to_string().contains("/definitely/not/here/adb"));
    }

    #[tokio::test]
    async fn execute_cancellation_kills_the_child() {
        let started = Instant::now();
        let err = execute(
            &sh("sleep 30"),
            tokio::time::sleep(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn execute_drains_large_output() {
        let out = execute(
            &sh("i=0; while [ $i -lt 20000 ]; do echo 1234567890; i=$((i+1)); done"),
            std::future::pending(),
        )
        .await
        .unwrap();
        assert_eq!(out.len(), 20000 * 11);
    }
}
