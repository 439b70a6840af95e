//! Python interpreter launch requests.
//!
//! The interpreter receives a single argument: the script path wrapped in double
//! quotes. Embedded quotes are not escaped.

use std::io;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: String,
    pub script_path: String,
}

impl LaunchRequest {
    pub fn new(program: impl Into<String>, script_path: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            script_path: script_path.into(),
        }
    }

    /// The argument string handed to the interpreter: `"` + script + `"`.
    pub fn arguments(&self) -> String {
        format!("\"{}\"", self.script_path)
    }

    /// Full command line, for diagnostics.
    pub fn command_line(&self) -> String {
        format!("{} {}", self.program, self.arguments())
    }

    pub fn has_embedded_quote(&self) -> bool {
        self.script_path.contains('"')
    }

    /// Build the OS command. No shell, inherited stdio, env and working directory.
    ///
    /// Windows receives the quoted token verbatim as part of the command line.
    /// Elsewhere there is no command-line string, so the script path becomes
    /// exactly one argv element.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.raw_arg(self.arguments());
        }
        #[cfg(not(windows))]
        {
            cmd.arg(&self.script_path);
        }
        cmd
    }
}

/// Spawn the interpreter on the tokio runtime. Must be called from within a runtime.
pub fn spawn_python(request: &LaunchRequest) -> io::Result<tokio::process::Child> {
    tokio::process::Command::from(request.command()).spawn()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_are_quoted() {
        let req = LaunchRequest::new("python", "script.py");
        assert_eq!(req.arguments(), "\"script.py\"");
    }

    #[test]
    fn test_arguments_keep_spaces_in_one_token() {
        let req = LaunchRequest::new("python", "C:\\My Scripts\\run model.py");
        assert_eq!(req.arguments(), "\"C:\\My Scripts\\run model.py\"");
    }

    #[test]
    fn test_embedded_quote_is_not_escaped() {
        let req = LaunchRequest::new("python", "odd\"name.py");
        assert!(req.has_embedded_quote());
        assert_eq!(req.arguments(), "\"odd\"name.py\"");
    }

    #[test]
    fn test_command_line() {
        let req = LaunchRequest::new("python", "C:\\scripts\\hello.py");
        assert_eq!(req.command_line(), "python \"C:\\scripts\\hello.py\"");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_command_passes_script_as_single_arg() {
        let req = LaunchRequest::new("python3", "/tmp/my script.py");
        let cmd = req.command();
        assert_eq!(cmd.get_program(), "python3");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["/tmp/my script.py"]);
        assert!(cmd.get_current_dir().is_none());
        assert_eq!(cmd.get_envs().count(), 0);
    }
}
