use crate::constants::verbosity;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// CLI entry point for viewset.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build every template set and report what was compiled.
    Check(ProjectArgs),
    /// Print the identity of every compiled template.
    List(ProjectArgs),
    /// Render one template to stdout.
    Render(RenderArgs),
}

/// Arguments shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Directory containing the viewset configuration file.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Application name.
    #[arg(value_name = "APP")]
    pub app: String,

    /// Template name, e.g. `root/index`.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output format (file extension), e.g. `html`.
    #[arg(value_name = "FORMAT")]
    pub format: String,

    /// Layout to wrap the template in. Defaults to the configured default layout.
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Render context as JSON string or `-` to read from stdin.
    #[arg(short, long)]
    pub context: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

impl Commands {
    pub fn verbose(&self) -> u8 {
        match self {
            Commands::Check(args) | Commands::List(args) => args.verbose,
            Commands::Render(args) => args.project.verbose,
        }
    }
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
