//! Trace sinks for the step's diagnostic line.

use std::sync::Mutex;

use tracing::info;

/// Fixed line emitted once the interpreter has exited.
pub const EXECUTED_PYTHON_TRACE: &str = "Executed Python";

pub trait TraceSink: Send + Sync {
    fn trace(&self, message: &str);
}

/// Forwards trace lines to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn trace(&self, message: &str) {
        info!(target: "call_python::trace", "{}", message);
    }
}

/// Keeps trace lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

impl TraceSink for MemorySink {
    fn trace(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
