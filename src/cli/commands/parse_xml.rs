use crate::bio::alignment::{parse_blast, MalformedPolicy, ParseOptions};
use crate::cli::output;
use crate::core::Config;
use crate::utils::files::{find_files, plan_savenames};
use anyhow::Context;
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

/// Inputs are taken from the top level of a directory only
const INPUT_PATTERN: &str = "*.xml";

#[derive(Args)]
pub struct ParseXmlArgs {
    /// BLAST XML file, or a directory of *.xml files
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Output directory for the alignment row tables
    #[arg(short, long, value_name = "DIR", default_value = "module_output/parse_blast")]
    pub output: PathBuf,

    /// Drop hits whose title or description does not parse instead of failing
    #[arg(long)]
    pub skip_malformed: bool,
}

pub fn run(args: ParseXmlArgs, config: &Config) -> anyhow::Result<()> {
    let inputs = find_files(&args.input, INPUT_PATTERN)
        .with_context(|| format!("Failed to collect BLAST XML files from {}", args.input.display()))?;
    let inputs = plan_savenames(&args.output, &inputs, "csv")?;
    info!("Parsing {} BLAST XML files", inputs.len());

    let options = ParseOptions {
        on_malformed: if args.skip_malformed {
            MalformedPolicy::Skip
        } else {
            config.parse_blast.on_malformed
        },
    };

    let pb = output::file_progress(inputs.len(), "Parsing BLAST XML");
    let results = inputs
        .par_iter()
        .map(|(input, target)| {
            let rows = parse_blast(input, target, &options)
                .with_context(|| format!("Failed to parse {}", input.display()))?;
            pb.inc(1);
            Ok((target.clone(), rows))
        })
        .collect::<anyhow::Result<Vec<_>>>();
    pb.finish_and_clear();
    let results = results?;

    output::success(&format!("Parsed {} BLAST XML files", results.len()));
    for (target, rows) in &results {
        output::written(target, *rows);
    }
    Ok(())
}
