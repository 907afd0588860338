// ABOUTME: Entry point for the deploy CLI application.
// ABOUTME: Parses arguments, resolves the environment once, and dispatches the command.

mod cli;

use clap::{CommandFactory, Parser};
use cli::Cli;
use stackdeploy::commands::{DeploymentCommand, Dispatcher};
use stackdeploy::compose::ComposeInvoker;
use stackdeploy::config::ProjectLayout;
use stackdeploy::engine::{self, BollardEngine, SystemProbe};
use stackdeploy::error::Result;
use stackdeploy::health::{HealthGate, HealthPolicy, HttpProbe};
use stackdeploy::output::Output;
use stackdeploy::vcs::Git;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output_mode());
    output.start_timer();

    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        if e.is_usage() {
            eprintln!();
            eprintln!("{}", Cli::command().render_help());
        }
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let command = DeploymentCommand::parse(cli.args.as_slice())?;

    if !command.needs_orchestrator() {
        println!("{}", Cli::command().render_help());
        return Ok(());
    }

    let root = match cli.project_dir {
        Some(dir) => dir,
        None => env::current_dir()?,
    };
    let mut layout = ProjectLayout::new(&root)?;
    if let Some(file) = cli.compose_file {
        layout = layout.with_compose_file(&file);
    }

    let engine = BollardEngine::detect();
    let context = engine::resolve(&engine, &SystemProbe, layout.compose_file()).await?;
    tracing::info!(
        "using {} with {}",
        context.command(),
        context.compose_file().display()
    );

    let dispatcher = Dispatcher::new(
        ComposeInvoker::new(context),
        HealthGate::new(HttpProbe::default(), HealthPolicy::default()),
        Git,
        layout,
        output.clone(),
    );

    let outcome = dispatcher.execute(&command).await?;
    if outcome.diagnostics.has_warnings() {
        tracing::debug!(
            "finished with {} warning(s)",
            outcome.diagnostics.warnings().len()
        );
    }

    Ok(())
}
