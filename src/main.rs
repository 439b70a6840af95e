mod cli;
mod printer;

use anyhow::{Context, Result};
use call_python::config::Config;
use call_python::step::{CallPythonStep, StepDefinition};
use is_terminal::IsTerminal;
use printer::TextPrinter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let mut cfg = Config::load();
    init_tracing(&cfg);

    if args.describe {
        let schema = serde_json::to_string_pretty(&StepDefinition::call_python())?;
        println!("{}", schema);
        return Ok(());
    }

    cfg.apply_overrides(args.python, args.script);

    let step = CallPythonStep::new();
    let signal = step
        .execute_async(&cfg)
        .await
        .context("CallPython step failed")?;

    let color = !args.no_color && std::io::stdout().is_terminal();
    TextPrinter { color }.print(signal);
    Ok(())
}

fn init_tracing(cfg: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
