//! Run an external Python interpreter against a script as a blocking step.
//!
//! [`ScriptInvoker`] starts the interpreter, waits for it to exit, emits one
//! trace line and reports a single completion branch. [`step::CallPythonStep`]
//! wraps it with the two-property schema a simulation host configures.

pub mod config;
pub mod invoker;
pub mod process;
pub mod step;
pub mod trace;

pub use invoker::{CompletionSignal, InvokeError, ScriptInvoker};
