//! Script invoker: run an interpreter against a script and block until it exits.
//!
//! The child's exit code is never acted upon. Any termination, clean or not,
//! completes the invocation with [`CompletionSignal::Success`].

use std::fmt;
use std::io;

use thiserror::Error;
use tracing::{debug, warn};

use crate::process::{LaunchRequest, Launcher, SystemLauncher};
use crate::trace::{TraceSink, TracingSink, EXECUTED_PYTHON_TRACE};

#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("{0} must not be empty")]
    EmptyArgument(&'static str),

    #[error("failed to start '{program}': {source}")]
    Launch { program: String, source: io::Error },

    #[error("failed while waiting for '{program}': {source}")]
    Wait { program: String, source: io::Error },
}

impl InvokeError {
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, Self::Launch { .. })
    }
}

/// Outward result of a finished invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionSignal {
    Success,
    Failure,
}

impl CompletionSignal {
    /// Zero-based exit branch in the host's numbering.
    pub fn exit_index(self) -> usize {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

pub struct ScriptInvoker<L = SystemLauncher, S = TracingSink> {
    launcher: L,
    sink: S,
}

impl ScriptInvoker {
    pub fn new() -> Self {
        Self::with_parts(SystemLauncher, TracingSink)
    }
}

impl Default for ScriptInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Launcher, S: TraceSink> ScriptInvoker<L, S> {
    pub fn with_parts(launcher: L, sink: S) -> Self {
        Self { launcher, sink }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Start `interpreter_path "script_path"` and wait for it to terminate.
    ///
    /// A launch failure returns before anything is traced. The process handle
    /// is dropped on every path out of this function.
    pub fn invoke(
        &self,
        interpreter_path: &str,
        script_path: &str,
    ) -> Result<CompletionSignal, InvokeError> {
        let request = prepare(interpreter_path, script_path)?;

        let mut child = self
            .launcher
            .spawn(&request)
            .map_err(|source| launch_error(&request, source))?;
        let exit_code = child.wait().map_err(|source| InvokeError::Wait {
            program: request.program.clone(),
            source,
        })?;
        drop(child);

        Ok(self.finish(&request, exit_code))
    }

    /// Same contract as [`invoke`](Self::invoke), awaiting the child from
    /// [`Launcher::spawn_async`] instead of blocking the thread.
    pub async fn invoke_async(
        &self,
        interpreter_path: &str,
        script_path: &str,
    ) -> Result<CompletionSignal, InvokeError> {
        let request = prepare(interpreter_path, script_path)?;

        let mut child = self
            .launcher
            .spawn_async(&request)
            .map_err(|source| launch_error(&request, source))?;
        let exit_code = child.wait().await.map_err(|source| InvokeError::Wait {
            program: request.program.clone(),
            source,
        })?;
        drop(child);

        Ok(self.finish(&request, exit_code))
    }

    fn finish(&self, request: &LaunchRequest, exit_code: Option<i32>) -> CompletionSignal {
        debug!(command = %request.command_line(), ?exit_code, "python process exited");
        self.sink.trace(EXECUTED_PYTHON_TRACE);
        CompletionSignal::Success
    }
}

fn prepare(interpreter_path: &str, script_path: &str) -> Result<LaunchRequest, InvokeError> {
    if interpreter_path.is_empty() {
        return Err(InvokeError::EmptyArgument("interpreter path"));
    }
    if script_path.is_empty() {
        return Err(InvokeError::EmptyArgument("script path"));
    }

    let request = LaunchRequest::new(interpreter_path, script_path);
    if request.has_embedded_quote() {
        warn!(
            script = %request.script_path,
            "script path contains a double quote; it is passed through unescaped"
        );
    }
    debug!(command = %request.command_line(), "starting python process");
    Ok(request)
}

fn launch_error(request: &LaunchRequest, source: io::Error) -> InvokeError {
    InvokeError::Launch {
        program: request.program.clone(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ChildProcess;
    use crate::trace::MemorySink;

    struct ExitWith(Option<i32>);

    impl Launcher for ExitWith {
        fn spawn(&self, _request: &LaunchRequest) -> io::Result<Box<dyn ChildProcess>> {
            Ok(Box::new(FinishedChild(self.0)))
        }
    }

    struct FinishedChild(Option<i32>);

    impl ChildProcess for FinishedChild {
        fn wait(&mut self) -> io::Result<Option<i32>> {
            Ok(self.0)
        }
    }

    struct BrokenWait;

    impl Launcher for BrokenWait {
        fn spawn(&self, _request: &LaunchRequest) -> io::Result<Box<dyn ChildProcess>> {
            Ok(Box::new(Interrupted))
        }
    }

    struct Interrupted;

    impl ChildProcess for Interrupted {
        fn wait(&mut self) -> io::Result<Option<i32>> {
            Err(io::Error::new(io::ErrorKind::Interrupted, "wait interrupted"))
        }
    }

    #[test]
    fn test_signal_exit_index() {
        assert_eq!(CompletionSignal::Success.exit_index(), 0);
        assert_eq!(CompletionSignal::Failure.exit_index(), 1);
        assert_eq!(CompletionSignal::Success.to_string(), "success");
    }

    #[test]
    fn test_empty_arguments_rejected_without_trace() {
        let invoker = ScriptInvoker::with_parts(ExitWith(Some(0)), MemorySink::new());

        let err = invoker.invoke("", "script.py").unwrap_err();
        assert!(matches!(err, InvokeError::EmptyArgument("interpreter path")));

        let err = invoker.invoke("python", "").unwrap_err();
        assert!(matches!(err, InvokeError::EmptyArgument("script path")));

        assert!(invoker.sink().is_empty());
    }

    #[test]
    fn test_signal_without_exit_code_still_succeeds() {
        let invoker = ScriptInvoker::with_parts(ExitWith(None), MemorySink::new());
        let signal = invoker.invoke("python", "killed.py").unwrap();
        assert_eq!(signal, CompletionSignal::Success);
        assert_eq!(invoker.sink().lines(), vec![EXECUTED_PYTHON_TRACE]);
    }

    #[test]
    fn test_wait_failure_is_not_traced() {
        let invoker = ScriptInvoker::with_parts(BrokenWait, MemorySink::new());
        let err = invoker.invoke("python", "script.py").unwrap_err();
        assert!(matches!(err, InvokeError::Wait { .. }));
        assert!(!err.is_launch_failure());
        assert!(invoker.sink().is_empty());
    }

    #[tokio::test]
    async fn test_async_wait_failure_is_not_traced() {
        let invoker = ScriptInvoker::with_parts(BrokenWait, MemorySink::new());
        let err = invoker.invoke_async("python", "script.py").await.unwrap_err();
        assert!(matches!(err, InvokeError::Wait { .. }));
        assert!(invoker.sink().is_empty());
    }
}
