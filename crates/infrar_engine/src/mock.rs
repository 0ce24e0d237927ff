//! Mock plugin invoker for testing.
//!
//! Provides a scripted implementation of the [`PluginInvoker`] trait so
//! tier behavior can be exercised without real child executables.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use infrar_proto::{Request, Response};

use crate::invoker::{InvokeError, PluginInvoker};

/// Mock invoker returning scripted outcomes keyed by child identifier.
///
/// The child identifier is matched against the path components of the
/// requested executable (a child always appears as a directory component
/// under the sibling-executable convention). Unscripted children behave as
/// unavailable. All invocations are captured for verification.
#[derive(Clone, Default)]
pub struct MockInvoker {
    outcomes: Arc<RwLock<HashMap<String, Result<Response, InvokeError>>>>,
    calls: Arc<RwLock<Vec<(PathBuf, Request)>>>,
}

impl MockInvoker {
    /// Create a mock with no scripted children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response for a child.
    pub fn with_response(self, child: impl Into<String>, response: Response) -> Self {
        self.outcomes.write().insert(child.into(), Ok(response));
        self
    }

    /// Script an invocation failure for a child.
    pub fn with_failure(self, child: impl Into<String>, error: InvokeError) -> Self {
        self.outcomes.write().insert(child.into(), Err(error));
        self
    }

    /// Executable paths of every invocation made so far.
    pub fn invocations(&self) -> Vec<PathBuf> {
        self.calls.read().iter().map(|(p, _)| p.clone()).collect()
    }

    /// Requests forwarded to children so far.
    pub fn forwarded_requests(&self) -> Vec<Request> {
        self.calls.read().iter().map(|(_, r)| r.clone()).collect()
    }

    /// Number of invocations made so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().len()
    }

    fn outcome_for(&self, executable: &Path) -> Result<Response, InvokeError> {
        let outcomes = self.outcomes.read();
        for (child, outcome) in outcomes.iter() {
            let matches = executable
                .components()
                .any(|c| c.as_os_str() == OsStr::new(child));
            if matches {
                return outcome.clone();
            }
        }
        Err(InvokeError::Unavailable(executable.to_path_buf()))
    }
}

#[async_trait]
impl PluginInvoker for MockInvoker {
    async fn invoke(&self, executable: &Path, request: &Request) -> Result<Response, InvokeError> {
        self.calls
            .write()
            .push((executable.to_path_buf(), request.clone()));
        self.outcome_for(executable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_path(child: &str) -> PathBuf {
        PathBuf::from("/plugins/services")
            .join(child)
            .join("orchestrator")
            .join("orchestrate")
    }

    fn generate_request() -> Request {
        Request::from_json(r#"{"command":"generate"}"#).unwrap()
    }

    #[tokio::test]
    async fn test_scripted_response() {
        let invoker = MockInvoker::new().with_response("storage", Response::ok());

        let resp = invoker
            .invoke(&child_path("storage"), &generate_request())
            .await
            .unwrap();
        assert!(resp.success);
        assert_eq!(invoker.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unscripted_child_is_unavailable() {
        let invoker = MockInvoker::new();
        let err = invoker
            .invoke(&child_path("compute"), &generate_request())
            .await
            .unwrap_err();
        assert!(matches!(err, InvokeError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_component_matching_is_exact() {
        // "storage" must not match the "cloud-storage" component.
        let invoker = MockInvoker::new().with_response("storage", Response::ok());
        let err = invoker
            .invoke(&child_path("cloud-storage"), &generate_request())
            .await
            .unwrap_err();
        assert!(matches!(err, InvokeError::Unavailable(_)));
    }
}
