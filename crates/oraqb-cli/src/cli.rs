use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Render parameterized Oracle SELECT statements.
#[derive(Debug, Clone, Parser)]
#[command(name = "oraqb", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Overrides RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render the root query of a TOML query file.
    Render(RenderArgs),
    /// Render the built-in employee report example.
    Demo(DemoArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Path to the query file.
    #[arg(default_value = "oraqb.toml")]
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DemoArgs {
    /// Fetch every row (2000) instead of the top 100.
    #[arg(long)]
    pub all_rows: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Render `:1, :2, ...` instead of `?` placeholders.
    #[arg(long)]
    pub numbered: bool,

    /// Fail instead of warning when validation finds a problem.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
