//! Subprocess plugin invocation.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use infrar_proto::{Request, Response};

/// Failure classification for one child invocation attempt.
///
/// None of these are fatal to the invoking tier; each is folded into a
/// warning during aggregation.
#[derive(Error, Debug, Clone)]
pub enum InvokeError {
    /// The resolved executable does not exist.
    #[error("plugin executable not found at {0:?}")]
    Unavailable(std::path::PathBuf),

    /// The child could not be spawned, the transport failed, or the child
    /// exited non-zero. Carries the combined output text for diagnosis.
    #[error("plugin execution failed: {0}")]
    Execution(String),

    /// The child terminated cleanly but its output is not a well-formed
    /// response.
    #[error("failed to parse plugin response: {0}")]
    Parse(String),
}

/// Executes one child plugin per call: serialized request on the child's
/// standard input, response read from its standard output.
#[async_trait]
pub trait PluginInvoker: Send + Sync {
    /// Run the child to completion and parse its response.
    ///
    /// Exactly one process is spawned per call; there is no retry and no
    /// timeout. Cancellation is the caller's process-lifetime boundary.
    async fn invoke(&self, executable: &Path, request: &Request) -> Result<Response, InvokeError>;
}

/// Production invoker backed by an isolated subprocess.
#[derive(Debug, Clone, Default)]
pub struct SubprocessInvoker;

impl SubprocessInvoker {
    /// Create a new subprocess invoker.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PluginInvoker for SubprocessInvoker {
    async fn invoke(&self, executable: &Path, request: &Request) -> Result<Response, InvokeError> {
        if !executable.exists() {
            return Err(InvokeError::Unavailable(executable.to_path_buf()));
        }

        let input = request
            .to_json()
            .map_err(|e| InvokeError::Execution(format!("failed to serialize request: {e}")))?;

        debug!("Invoking plugin {:?}", executable);

        let mut child = Command::new(executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                InvokeError::Execution(format!("failed to spawn {}: {e}", executable.display()))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).await.map_err(|e| {
                InvokeError::Execution(format!("failed to write request to plugin stdin: {e}"))
            })?;
        }

        let output = child.wait_with_output().await.map_err(|e| {
            InvokeError::Execution(format!("failed to wait for plugin exit: {e}"))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(InvokeError::Execution(format!(
                "plugin exited with {}, output: {}",
                output.status,
                combined(&stdout, &stderr),
            )));
        }

        Response::from_json(stdout.trim())
            .map_err(|e| InvokeError::Parse(format!("{e}, output: {}", stdout.trim())))
    }
}

/// Combined output text used in diagnostics.
fn combined(stdout: &str, stderr: &str) -> String {
    match (stdout.trim(), stderr.trim()) {
        (out, "") => out.to_string(),
        ("", err) => err.to_string(),
        (out, err) => format!("{out}\n{err}"),
    }
}
