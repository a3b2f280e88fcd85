mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blogctl")]
#[command(version, about = "Validate blog form submissions from the command line", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "blog.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one submission of a form and print the outcome as JSON
    Check(commands::check::CheckArgs),

    /// Print the effective configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = blog_forms::Config::load(&cli.config)?;

    match cli.command {
        Commands::Check(args) => commands::check::execute(&config, args).await,
        Commands::Config => {
            commands::config::execute(&config);
            Ok(ExitCode::SUCCESS)
        }
    }
}
