use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::executor::{StdinInput, VM};
use crate::loader::load_source;
use crate::parser::{self, semantic_validator};

#[derive(Parser)]
#[command(name = "lettercode")]
#[command(about = "Lettercode - an interpreter for a whitespace-free letter language", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides lettercode.toml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a program
    Run {
        /// Program file
        file: PathBuf,
    },

    /// Print the parsed program as JSON
    Parse {
        /// Program file
        file: PathBuf,

        /// Pretty-print the JSON
        #[arg(short = 'p', long = "pretty")]
        pretty: bool,
    },

    /// Parse and validate a program without running it
    Check {
        /// Program file
        file: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Internal function that handles CLI commands
fn run_cli_with_args(cli: Cli) -> Result<()> {
    // Load configuration before anything else so config errors surface first
    let settings = Settings::builder().config_path(cli.config.clone()).build()?;
    init_tracing(&settings);

    match cli.command {
        Commands::Run { file } => {
            let source = load(&file, &settings)?;
            let program = crate::prepare(&source)?;

            let stdout = io::stdout();
            let input = Box::new(StdinInput::new(settings.input.prompt.clone()));
            let mut vm = VM::new(stdout.lock(), input);
            let control = vm.run(&program)?;
            debug!(?control, "program finished");
        }

        Commands::Parse { file, pretty } => {
            let source = load(&file, &settings)?;
            let program = parser::parse_program(&source)?;
            let json = if pretty {
                serde_json::to_string_pretty(&program)?
            } else {
                serde_json::to_string(&program)?
            };
            println!("{}", json);
        }

        Commands::Check { file } => {
            let source = load(&file, &settings)?;
            let program = parser::parse_program(&source)?;
            let findings = semantic_validator::validate_program(&program);

            for finding in &findings {
                println!("{}", finding);
            }
            if semantic_validator::has_errors(&findings) {
                anyhow::bail!("{} has errors", file.display());
            }
            if findings.is_empty() {
                println!("{}: ok", file.display());
            }
        }

        Commands::Config => {
            print!("{}", settings.to_toml()?);
        }
    }

    Ok(())
}

fn load(file: &Path, settings: &Settings) -> Result<String> {
    load_source(file, &settings.source)
        .with_context(|| format!("Failed to load {}", file.display()))
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured filter.
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&settings.log.filter).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
    if installed.is_err() {
        warn!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_global_config() {
        let cli = Cli::parse_from(["lettercode", "run", "prog.lc", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Run { file } => assert_eq!(file, PathBuf::from("prog.lc")),
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_parse_pretty_flag() {
        let cli = Cli::parse_from(["lettercode", "parse", "-p", "prog.lc"]);
        assert!(matches!(cli.command, Commands::Parse { pretty: true, .. }));
    }
}
