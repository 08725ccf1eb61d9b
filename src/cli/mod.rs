pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "biopathpred",
    version,
    about = "Metabolic pathway prediction from protein alignment search output",
    long_about = "BioPathPred flattens BLAST XML output into annotated alignment rows, keeps \
                  the best hit of every predicted gene, and summarizes per-organism \
                  enzyme/compound match reports into summary and ranking tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE", global = true, env = "BIOPATHPRED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert BLAST XML output into alignment row tables
    ParseXml(commands::parse_xml::ParseXmlArgs),

    /// Keep the best alignment row of every gene
    BestBlast(commands::best_blast::BestBlastArgs),

    /// Summarize enzyme/compound match reports and rank organisms
    Analyze(commands::analyze::AnalyzeArgs),
}
