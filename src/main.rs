use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Claude Code hook that commits each edited file with a templated message.
#[derive(Debug, Parser)]
#[command(name = "auto-commit-hook", version, about)]
struct Cli {
    /// Log decision steps to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run as a Claude Code PostToolUse hook (reads stdin, writes stdout/stderr)
    Hook(ConfigArgs),
    /// Print the effective configuration as JSON
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// Path to the JSON config file [default: config.json next to the executable]
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON object whose keys override the config file, e.g. '{"skipEmptyCommits":false}'
    #[arg(long, value_parser = parse_overrides)]
    overrides: Option<Map<String, Value>>,
}

fn parse_overrides(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("overrides must be a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("auto_commit_hook=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Hook(args) => {
            auto_commit_hook::run_hook(args.config.as_deref(), args.overrides.as_ref())
        }
        Commands::Config(args) => {
            auto_commit_hook::show_config(args.config.as_deref(), args.overrides.as_ref())
        }
    };
    std::process::exit(exit_code);
}
