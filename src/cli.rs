use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "call-python", about = "Run a Python script and wait for it to exit", version)]
pub struct Cli {
    /// Python script to run (overrides PYTHON_SCRIPT_PATH).
    #[arg(value_name = "SCRIPT")]
    pub script: Option<String>,

    /// Python interpreter to launch (overrides PYTHON_EXECUTABLE_LOCATION).
    #[arg(long = "python", value_name = "PATH")]
    pub python: Option<String>,

    /// Print the step definition and property schema as JSON, then exit.
    #[arg(long)]
    pub describe: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_and_python() {
        let cli = Cli::try_parse_from(["call-python", "--python", "python3", "run.py"]).unwrap();
        assert_eq!(cli.script.as_deref(), Some("run.py"));
        assert_eq!(cli.python.as_deref(), Some("python3"));
        assert!(!cli.describe);
    }

    #[test]
    fn test_parse_describe_without_script() {
        let cli = Cli::try_parse_from(["call-python", "--describe"]).unwrap();
        assert!(cli.describe);
        assert!(cli.script.is_none());
    }
}
