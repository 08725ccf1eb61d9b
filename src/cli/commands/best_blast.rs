use crate::cli::output;
use crate::core::Config;
use crate::processing::{find_best_blast, BestHitSelector, Criterion, RowFilter};
use crate::utils::files::{find_files, plan_savenames};
use anyhow::Context;
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Inputs are taken from the top level of a directory only
const INPUT_PATTERN: &str = "*.csv";

#[derive(Args)]
pub struct BestBlastArgs {
    /// Alignment row table, or a directory of *.csv files
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Output directory for the best-hit tables
    #[arg(short, long, value_name = "DIR", default_value = "module_output/best_blast")]
    pub output: PathBuf,

    /// Column maximized within each gene [default: from config, else score]
    #[arg(short, long, value_enum)]
    pub criteria: Option<Criterion>,

    /// Row filter applied before selection, e.g. "evalue<=1e-5" (repeatable)
    #[arg(short, long = "filter", value_name = "EXPR")]
    pub filters: Vec<String>,
}

pub fn run(args: BestBlastArgs, config: &Config) -> anyhow::Result<()> {
    let criterion = args.criteria.unwrap_or(config.best_blast.criteria);
    let expressions: &[String] = if args.filters.is_empty() {
        &config.best_blast.filter
    } else {
        &args.filters
    };
    let filters = RowFilter::parse_all(expressions)?;
    let selector = BestHitSelector::new(criterion).with_filters(filters);

    let inputs = find_files(&args.input, INPUT_PATTERN)
        .with_context(|| format!("Failed to collect row tables from {}", args.input.display()))?;
    let inputs = plan_savenames(&args.output, &inputs, "csv")?;
    info!("Selecting best hits by {} from {} tables", criterion, inputs.len());

    let pb = output::file_progress(inputs.len(), "Selecting best hits");
    let results = inputs
        .par_iter()
        .map(|(input, target)| {
            let rows = find_best_blast(input, target, &selector)
                .with_context(|| format!("Failed to select best hits from {}", input.display()))?;
            pb.inc(1);
            Ok((target.clone(), rows))
        })
        .collect::<anyhow::Result<Vec<_>>>();
    pb.finish_and_clear();
    let results = results?;

    output::success(&format!(
        "Selected best hits by {} for {} tables",
        criterion,
        results.len()
    ));
    for (target, rows) in &results {
        output::written(target, *rows);
    }
    Ok(())
}
