//! Mock tool implementation for unit testing.
//!
//! Records every invocation and replays canned stdout, so gateway and
//! catalog logic can be tested without the external binary.
//!
//! # Example
//!
//! ```rust,ignore
//! use dctl::tool::mock::MockTool;
//!
//! let mock = MockTool::new();
//! mock.respond("get -tagID=1 -feature=brightness", "0.5\n");
//! // ... drive a Gateway over it, then:
//! mock.assert_called("get -tagID=1 -feature=brightness");
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::trace;

use super::Tool;
use crate::error::{DctlError, Result};

/// Mock display tool for testing without the real binary.
///
/// Responses are keyed by the full argument list joined with single spaces.
/// Unmatched invocations fail the same way a broken binary would, unless a
/// default response is installed.
#[derive(Default)]
pub struct MockTool {
    responses: Mutex<HashMap<String, String>>,
    default_response: Mutex<Option<String>>,
    injected_error: Mutex<Option<DctlError>>,
    failing_tags: Mutex<Vec<String>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockTool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Configuration ===

    /// Install canned stdout for an exact argument list (space-joined).
    pub fn respond(&self, args: &str, stdout: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(args.to_string(), stdout.to_string());
    }

    /// Install a fallback stdout for any unmatched invocation.
    pub fn respond_default(&self, stdout: &str) {
        *self.default_response.lock().unwrap() = Some(stdout.to_string());
    }

    /// Inject an error for the next invocation.
    pub fn inject_error(&self, error: DctlError) {
        *self.injected_error.lock().unwrap() = Some(error);
    }

    /// Make every invocation addressing `tag` fail.
    pub fn fail_tag(&self, tag: &str) {
        self.failing_tags.lock().unwrap().push(tag.to_string());
    }

    // === Assertions ===

    /// All recorded invocations, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// All recorded invocations as space-joined strings.
    #[must_use]
    pub fn joined_calls(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.join(" ")).collect()
    }

    /// Number of invocations performed.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Assert a specific invocation happened at least once.
    ///
    /// # Panics
    ///
    /// Panics if the invocation was not recorded.
    pub fn assert_called(&self, args: &str) {
        let calls = self.joined_calls();
        assert!(
            calls.iter().any(|c| c == args),
            "Expected invocation '{args}' not found in: {calls:#?}",
        );
    }

    /// The most recent invocation, space-joined.
    #[must_use]
    pub fn last_call(&self) -> Option<String> {
        self.joined_calls().last().cloned()
    }

    fn check_failures(&self, args: &[String]) -> Result<()> {
        if let Some(error) = self.injected_error.lock().unwrap().take() {
            return Err(error);
        }

        let failing = self.failing_tags.lock().unwrap();
        for tag in failing.iter() {
            let marker = format!("-tagID={tag}");
            if args.iter().any(|a| a == &marker) {
                return Err(DctlError::CommandFailed {
                    program: "mock".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: format!("mock failure for tag {tag}"),
                });
            }
        }
        Ok(())
    }
}

impl Tool for MockTool {
    async fn invoke(&self, args: &[String]) -> Result<String> {
        trace!(?args, "Mock invocation");
        self.calls.lock().unwrap().push(args.to_vec());
        self.check_failures(args)?;

        let key = args.join(" ");
        if let Some(stdout) = self.responses.lock().unwrap().get(&key) {
            return Ok(stdout.clone());
        }
        if let Some(stdout) = self.default_response.lock().unwrap().clone() {
            return Ok(stdout);
        }

        Err(DctlError::CommandFailed {
            program: "mock".to_string(),
            status: "exit status: 1".to_string(),
            stderr: format!("mock: no canned response for '{key}'"),
        })
    }
}
