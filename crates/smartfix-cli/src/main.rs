use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod presenter;

#[derive(Parser)]
#[command(name = "smartfix")]
#[command(about = "SmartFix - interactive appliance fault triage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive triage session against the diagnosis service
    Diagnose(commands::diagnose::DiagnoseArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Diagnose(args) => commands::diagnose::run(args).await,
    }
}
