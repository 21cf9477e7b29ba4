mod check;
mod config;
mod filter;
mod verify;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{OutputFormat, SpecConfig};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pox-spec")]
#[command(about = "Check and filter versions against Python packaging specifiers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory to search upward from for pox-spec.toml
    #[arg(short = 'd', long, default_value = ".", global = true)]
    working_dir: PathBuf,

    /// Use this configuration file instead of searching for pox-spec.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides [output] format from the config file)
    #[arg(short = 'f', long, value_enum, global = true)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether a version satisfies a set of specifiers
    Check(check::CheckArgs),

    /// Print the candidate versions that satisfy a set of specifiers
    Filter(filter::FilterArgs),

    /// Verify installed tool versions against the configured requirements
    Verify(verify::VerifyArgs),
}

/// Settings shared by all subcommands
pub struct Context {
    pub config: SpecConfig,
    pub format: OutputFormat,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // RUST_LOG takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn load_config(cli: &Cli) -> Result<SpecConfig> {
    if let Some(path) = &cli.config {
        return SpecConfig::load_file(path);
    }

    match SpecConfig::load(&cli.working_dir)? {
        Some((path, config)) => {
            log::debug!("Using configuration {}", path.display());
            Ok(config)
        }
        None => Ok(SpecConfig::default()),
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = load_config(&cli)?;
    let ctx = Context {
        format: config.output_format(cli.format),
        config,
    };

    match cli.command {
        Commands::Check(args) => check::execute(args, &ctx),
        Commands::Filter(args) => filter::execute(args, &ctx),
        Commands::Verify(args) => verify::execute(args, &ctx),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), err);
            ExitCode::from(2)
        }
    }
}
