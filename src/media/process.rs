use std::{process::Stdio, time::Duration};

use tokio::process::Command;
use tracing::debug;

use super::error::ToolError;

/// Captured output of a finished subprocess.
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs `program` with `args`, capturing stdout and stderr, bounded by a
/// wall-clock timeout. When the timeout fires the child is killed, so no
/// process outlives the call.
pub async fn run_with_timeout(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<ProcessOutput, ToolError> {
    debug!(
        "Running {} {:?} with {}s timeout",
        program,
        args,
        timeout.as_secs()
    );

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result?,
        // Dropping the elapsed future drops the child handle, which kills the
        // process (kill_on_drop above).
        Err(_) => return Err(ToolError::Timeout { limit: timeout }),
    };

    Ok(ProcessOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_on_success() {
        let output = run_with_timeout(
            "sh",
            &["-c".to_string(), "echo hello".to_string()],
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn captures_stderr_on_nonzero_exit() {
        let output = run_with_timeout(
            "sh",
            &["-c".to_string(), "echo boom >&2; exit 3".to_string()],
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert!(!output.success());
        assert_eq!(output.stderr.trim(), "boom");
    }

    #[tokio::test]
    async fn timeout_kills_slow_process() {
        let started = std::time::Instant::now();
        let result = run_with_timeout(
            "sh",
            &["-c".to_string(), "sleep 5".to_string()],
            Duration::from_millis(200),
        )
        .await;

        assert!(matches!(result, Err(ToolError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn missing_binary_is_an_io_error() {
        let result =
            run_with_timeout("definitely-not-a-real-binary", &[], Duration::from_secs(1)).await;
        assert!(matches!(result, Err(ToolError::Io(_))));
    }
}
