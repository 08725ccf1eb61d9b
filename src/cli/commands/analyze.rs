use crate::cli::output;
use crate::core::Config;
use crate::report::aggregator::{mapping_analysis, AnalysisOptions, MissingKeyPolicy};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Directory searched for match reports
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// Output directory for the summary and prediction tables
    #[arg(short, long, value_name = "DIR", default_value = "module_output/analysis")]
    pub output: PathBuf,

    /// Compound key ranking the organisms [default: from config, else iaa]
    #[arg(short = 'k', long = "key", value_name = "KEY")]
    pub ranking_key: Option<String>,

    /// Leave organisms without the ranking key out of the ranking instead of failing
    #[arg(long)]
    pub skip_missing: bool,

    /// Number of ranked organisms to print
    #[arg(long, default_value = "10")]
    pub top: usize,
}

pub fn run(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    let options = AnalysisOptions {
        ranking_key: args
            .ranking_key
            .clone()
            .unwrap_or_else(|| config.analysis.ranking_key.clone()),
        on_missing_key: if args.skip_missing {
            MissingKeyPolicy::Skip
        } else {
            config.analysis.on_missing_key
        },
        report_pattern: config.analysis.report_pattern.clone(),
    };

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message(format!("Summarizing reports in {}...", args.input.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = mapping_analysis(&args.input, &args.output, &options);
    spinner.finish_and_clear();
    let analysis = result
        .with_context(|| format!("Failed to analyze match reports in {}", args.input.display()))?;

    output::success(&format!(
        "Summarized {} match reports into {}",
        analysis.report_count,
        args.output.display()
    ));
    output::print_ranking_table(&options.ranking_key, &analysis.ranking, args.top);
    Ok(())
}
