use biopathpred::cli::commands::{self, resolve_config};
use biopathpred::cli::{Cli, Commands};
use biopathpred::utils::parallel::{configure_thread_pool, resolve_threads};
use biopathpred::BioPathPredError;
use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    // BIOPATHPRED_LOG applies unless -v asks for more
    let log_level = match verbose {
        0 => std::env::var("BIOPATHPRED_LOG").unwrap_or_else(|_| "warn".to_string()),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<BioPathPredError>() {
        Some(BioPathPredError::Configuration(_)) | Some(BioPathPredError::InvalidFilter(_)) => 2,
        Some(BioPathPredError::Io(_)) | Some(BioPathPredError::MissingInput(_)) => 3,
        Some(e) if e.is_parse_error() => 4,
        _ => 1,
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    let threads = cli.threads.unwrap_or(config.performance.threads);
    configure_thread_pool(threads)?;
    tracing::info!("Using {} threads", resolve_threads(threads));

    match cli.command {
        Commands::ParseXml(args) => commands::parse_xml::run(args, &config),
        Commands::BestBlast(args) => commands::best_blast::run(args, &config),
        Commands::Analyze(args) => commands::analyze::run(args, &config),
    }
}
