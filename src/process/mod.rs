//! Interpreter process management (launch, wait, handle release).

use std::io;
use std::process::Child;

use async_trait::async_trait;

pub mod python;

pub use python::LaunchRequest;

/// A started child process owned by exactly one invocation.
///
/// Dropping the value releases the OS handle without killing the child.
pub trait ChildProcess: Send {
    /// Block until the child terminates. `None` when the OS reports no exit code
    /// (e.g. killed by a signal).
    fn wait(&mut self) -> io::Result<Option<i32>>;
}

/// A started child process awaited from async code.
#[async_trait]
pub trait AsyncChildProcess: Send {
    async fn wait(&mut self) -> io::Result<Option<i32>>;
}

/// Starts child processes for launch requests.
pub trait Launcher: Send + Sync {
    fn spawn(&self, request: &LaunchRequest) -> io::Result<Box<dyn ChildProcess>>;

    /// Start a child to be awaited on the tokio runtime. By default the
    /// blocking child from [`spawn`](Self::spawn) is waited on a blocking thread.
    fn spawn_async(&self, request: &LaunchRequest) -> io::Result<Box<dyn AsyncChildProcess>> {
        let child = self.spawn(request)?;
        Ok(Box::new(BlockingWait { child: Some(child) }))
    }
}

/// Launcher backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn spawn(&self, request: &LaunchRequest) -> io::Result<Box<dyn ChildProcess>> {
        let child = request.command().spawn()?;
        Ok(Box::new(ProcessHandle { child }))
    }

    fn spawn_async(&self, request: &LaunchRequest) -> io::Result<Box<dyn AsyncChildProcess>> {
        let child = python::spawn_python(request)?;
        Ok(Box::new(AsyncProcessHandle { child }))
    }
}

/// Owned `std::process::Child`; the OS handle closes when this is dropped.
pub struct ProcessHandle {
    child: Child,
}

impl ChildProcess for ProcessHandle {
    fn wait(&mut self) -> io::Result<Option<i32>> {
        Ok(self.child.wait()?.code())
    }
}

/// Owned tokio child; the OS handle closes when this is dropped.
pub struct AsyncProcessHandle {
    child: tokio::process::Child,
}

#[async_trait]
impl AsyncChildProcess for AsyncProcessHandle {
    async fn wait(&mut self) -> io::Result<Option<i32>> {
        Ok(self.child.wait().await?.code())
    }
}

struct BlockingWait {
    child: Option<Box<dyn ChildProcess>>,
}

#[async_trait]
impl AsyncChildProcess for BlockingWait {
    async fn wait(&mut self) -> io::Result<Option<i32>> {
        let mut child = self
            .child
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "child already waited on"))?;
        let (child, result) = tokio::task::spawn_blocking(move || {
            let result = child.wait();
            (child, result)
        })
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        self.child = Some(child);
        result
    }
}
