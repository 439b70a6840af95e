//! CallPython step: metadata, property schema, and execution against a
//! per-run property context.

use std::collections::HashMap;

use serde::Serialize;

use crate::invoker::{CompletionSignal, InvokeError, ScriptInvoker};
use crate::process::{Launcher, SystemLauncher};
use crate::trace::{TraceSink, TracingSink};

pub const STEP_NAME: &str = "CallPython";
pub const PYTHON_EXECUTABLE_LOCATION: &str = "PythonExecutableLocation";
pub const PYTHON_SCRIPT_PATH: &str = "PythonScriptPath";
pub const DEFAULT_PYTHON_EXECUTABLE: &str = "python.exe";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDefinition {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub default_value: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub number_of_exits: u8,
    pub properties: Vec<PropertyDefinition>,
}

impl StepDefinition {
    pub fn call_python() -> Self {
        Self {
            name: STEP_NAME,
            description: "Runs a Python script and waits for it to exit.",
            number_of_exits: 1,
            properties: vec![
                PropertyDefinition {
                    name: PYTHON_EXECUTABLE_LOCATION,
                    display_name: "Python Executable Location",
                    description: "Interpreter to launch.",
                    default_value: DEFAULT_PYTHON_EXECUTABLE,
                    required: true,
                },
                PropertyDefinition {
                    name: PYTHON_SCRIPT_PATH,
                    display_name: "Python Script Path",
                    description: "Full path of the .py file to run.",
                    default_value: "",
                    required: true,
                },
            ],
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Per-run string property lookup supplied by whoever drives the step.
pub trait PropertyReader {
    fn get_string(&self, name: &str) -> Option<String>;
}

impl PropertyReader for HashMap<String, String> {
    fn get_string(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProperties {
    pub python_executable: String,
    pub script_path: String,
}

pub struct CallPythonStep<L = SystemLauncher, S = TracingSink> {
    definition: StepDefinition,
    invoker: ScriptInvoker<L, S>,
}

impl CallPythonStep {
    pub fn new() -> Self {
        Self::with_invoker(ScriptInvoker::new())
    }
}

impl Default for CallPythonStep {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Launcher, S: TraceSink> CallPythonStep<L, S> {
    pub fn with_invoker(invoker: ScriptInvoker<L, S>) -> Self {
        Self {
            definition: StepDefinition::call_python(),
            invoker,
        }
    }

    pub fn definition(&self) -> &StepDefinition {
        &self.definition
    }

    pub fn invoker(&self) -> &ScriptInvoker<L, S> {
        &self.invoker
    }

    /// Read both properties, falling back to schema defaults. Required
    /// properties that end up empty are rejected.
    pub fn resolve(
        &self,
        properties: &dyn PropertyReader,
    ) -> Result<ResolvedProperties, InvokeError> {
        Ok(ResolvedProperties {
            python_executable: self.resolve_one(properties, PYTHON_EXECUTABLE_LOCATION)?,
            script_path: self.resolve_one(properties, PYTHON_SCRIPT_PATH)?,
        })
    }

    fn resolve_one(
        &self,
        properties: &dyn PropertyReader,
        name: &'static str,
    ) -> Result<String, InvokeError> {
        let definition = self.definition.property(name);
        let value = properties
            .get_string(name)
            .filter(|v| !v.is_empty())
            .or_else(|| {
                definition
                    .map(|d| d.default_value)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        if value.is_empty() && definition.is_some_and(|d| d.required) {
            return Err(InvokeError::EmptyArgument(name));
        }
        Ok(value)
    }

    pub fn execute(&self, properties: &dyn PropertyReader) -> Result<CompletionSignal, InvokeError> {
        let resolved = self.resolve(properties)?;
        self.invoker
            .invoke(&resolved.python_executable, &resolved.script_path)
    }

    pub async fn execute_async(
        &self,
        properties: &dyn PropertyReader,
    ) -> Result<CompletionSignal, InvokeError> {
        let resolved = self.resolve(properties)?;
        self.invoker
            .invoke_async(&resolved.python_executable, &resolved.script_path)
            .await
    }
}
