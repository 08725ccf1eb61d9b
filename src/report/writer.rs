//! CSV emission of the summary and prediction tables

use crate::report::aggregator::{AggregateStat, AnalysisOutput, PredictionRow};
use crate::report::match_report::Section;
use crate::utils::files::StagedFile;
use crate::BioPathPredResult;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PREDICTION_OUTPUT: &str = "prediction_output.csv";

/// `compound_output.csv` or `enzyme_output.csv`
pub fn summary_filename(section: Section) -> String {
    format!("{}_output.csv", section.name())
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(writer)
}

pub fn write_summary<W: Write>(
    writer: W,
    section: Section,
    stats: &[AggregateStat],
) -> BioPathPredResult<()> {
    let name = section.name();
    let mut csv_writer = csv_writer(writer);
    csv_writer.write_record([
        format!("{}_key", name).as_str(),
        format!("{}_value", name).as_str(),
        "max",
        "min",
        "mean",
        "stdev",
    ])?;
    for stat in stats {
        csv_writer.serialize((&stat.key, stat.total, stat.max, stat.min, stat.mean, stat.stdev))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_prediction<W: Write>(writer: W, rows: &[PredictionRow]) -> BioPathPredResult<()> {
    let mut csv_writer = csv_writer(writer);
    csv_writer.write_record(["species", "score"])?;
    for row in rows {
        csv_writer.serialize((&row.species, row.score))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the three tables of a run into `output_dir`.
///
/// Every table is staged before any is moved into place, and tables already moved
/// are removed again if a later one cannot be, so a failure leaves none of them behind.
pub fn write_analysis(output_dir: &Path, output: &AnalysisOutput) -> BioPathPredResult<Vec<PathBuf>> {
    let mut compound = StagedFile::new(&output_dir.join(summary_filename(Section::Compound)))?;
    write_summary(compound.file_mut(), Section::Compound, &output.compound_summary)?;

    let mut enzyme = StagedFile::new(&output_dir.join(summary_filename(Section::Enzyme)))?;
    write_summary(enzyme.file_mut(), Section::Enzyme, &output.enzyme_summary)?;

    let mut prediction = StagedFile::new(&output_dir.join(PREDICTION_OUTPUT))?;
    write_prediction(prediction.file_mut(), &output.ranking)?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(3);
    for staged in [compound, enzyme, prediction] {
        let target = staged.target().to_path_buf();
        if let Err(e) = staged.commit() {
            // Take back the tables already moved into place
            for path in &written {
                if let Err(remove_err) = std::fs::remove_file(path) {
                    warn!("Failed to remove {} after an incomplete write: {}", path.display(), remove_err);
                }
            }
            return Err(e);
        }
        debug!("Wrote {}", target.display());
        written.push(target);
    }
    Ok(written)
}
