// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Global flags are parsed here; the command word goes to the dispatcher's table.

use clap::Parser;
use std::path::PathBuf;
use stackdeploy::commands::USAGE;
use stackdeploy::output::OutputMode;

#[derive(Parser)]
#[command(name = "deploy")]
#[command(about = "Build, start, stop and inspect the server and analyzer stack")]
#[command(version)]
#[command(after_help = USAGE)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings, errors and final results
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of human-readable output
    #[arg(long)]
    pub json: bool,

    /// Directory holding the compose file and .env (default: current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Compose file, relative to the project directory
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub compose_file: Option<PathBuf>,

    /// Command and its arguments (default: up)
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}
