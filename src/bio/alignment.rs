//! Flattening of BLAST records into per-HSP annotation rows

use crate::bio::blast_xml::{BlastOutput, BlastRecord, Hit};
use crate::bio::description::{HitTitle, UniProtDescription, MISSING_FIELD};
use crate::bio::query::AlignmentQuery;
use crate::utils::files::StagedFile;
use crate::{BioPathPredError, BioPathPredResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Column order of the alignment row table
pub const ROW_HEADER: [&str; 14] = [
    "id",
    "start",
    "end",
    "alignment_id",
    "enzyme_id",
    "enzyme_code",
    "product",
    "organism",
    "existence",
    "gene",
    "score",
    "evalue",
    "identity_percentage",
    "query_coverage",
];

/// Handling of hits whose title or description does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the whole input file
    #[default]
    Abort,
    /// Log a warning and drop the hit
    Skip,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub on_malformed: MalformedPolicy,
}

/// Annotation shared by every HSP of one hit
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentHit {
    pub alignment_id: String,
    pub enzyme_id: Option<String>,
    pub enzyme_code: Option<String>,
    pub product: String,
    pub organism: String,
    pub existence: u8,
    pub gene: Option<String>,
}

impl AlignmentHit {
    pub fn from_hit(hit: &Hit) -> BioPathPredResult<Self> {
        let title = HitTitle::parse(&hit.id, &hit.def)?;
        let description = UniProtDescription::parse(&title.description)?;

        Ok(Self {
            alignment_id: title.alignment_id,
            enzyme_id: description.enzyme_id,
            enzyme_code: description.enzyme_code,
            product: description.product,
            organism: description.organism,
            existence: description.existence,
            gene: description.gene,
        })
    }
}

/// One (query, hit, hsp) triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRow {
    pub id: String,
    pub start: u64,
    pub end: u64,
    pub alignment_id: String,
    pub enzyme_id: String,
    pub enzyme_code: String,
    pub product: String,
    pub organism: String,
    pub existence: u8,
    pub gene: String,
    pub score: f64,
    pub evalue: f64,
    pub identity_percentage: f64,
    pub query_coverage: f64,
}

/// Round to three decimals, the precision of the row table
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn percentage(numerator: f64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round3(numerator * 100.0 / denominator as f64)
}

fn or_missing(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING_FIELD.to_string())
}

/// Build the rows of a single BLAST record
pub fn record_rows(
    record: &BlastRecord,
    options: &ParseOptions,
) -> BioPathPredResult<Vec<AlignmentRow>> {
    let query = AlignmentQuery::parse(&record.query_def)?;
    let mut rows = Vec::new();

    for hit in &record.hits.hits {
        let annotation = match AlignmentHit::from_hit(hit) {
            Ok(annotation) => annotation,
            Err(
                e @ (BioPathPredError::MalformedTitle(_)
                | BioPathPredError::MalformedDescription(_)),
            ) if options.on_malformed == MalformedPolicy::Skip => {
                warn!("Skipping hit {} of query {}: {}", hit.id, query.id, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        for hsp in &hit.hsps.hsps {
            rows.push(AlignmentRow {
                id: query.id.clone(),
                start: query.start,
                end: query.end,
                alignment_id: annotation.alignment_id.clone(),
                enzyme_id: or_missing(&annotation.enzyme_id),
                enzyme_code: or_missing(&annotation.enzyme_code),
                product: annotation.product.clone(),
                organism: annotation.organism.clone(),
                existence: annotation.existence,
                gene: or_missing(&annotation.gene),
                score: hsp.bit_score,
                evalue: hsp.evalue,
                identity_percentage: percentage(hsp.identity as f64, hsp.align_len),
                query_coverage: percentage(
                    hsp.align_len.saturating_sub(hsp.gaps) as f64,
                    record.query_len,
                ),
            });
        }
    }

    Ok(rows)
}

/// Parse BLAST XML from a reader into rows, in encounter order
pub fn parse_blast_reader<R: BufRead>(
    reader: R,
    options: &ParseOptions,
) -> BioPathPredResult<Vec<AlignmentRow>> {
    let output = BlastOutput::from_reader(reader)?;
    let mut rows = Vec::new();
    for record in output.records() {
        rows.extend(record_rows(record, options)?);
    }
    Ok(rows)
}

pub fn parse_blast_file(path: &Path, options: &ParseOptions) -> BioPathPredResult<Vec<AlignmentRow>> {
    if !path.is_file() {
        return Err(BioPathPredError::MissingInput(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    let rows = parse_blast_reader(reader, options)?;
    debug!("Parsed {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Write rows as CSV with the alignment row header
pub fn write_rows<W: Write>(writer: W, rows: &[AlignmentRow]) -> BioPathPredResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(ROW_HEADER)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Convert one BLAST XML file into the alignment row CSV.
///
/// Nothing is written to `output` unless the whole input parses.
pub fn parse_blast(input: &Path, output: &Path, options: &ParseOptions) -> BioPathPredResult<usize> {
    let rows = parse_blast_file(input, options)?;

    let mut staged = StagedFile::new(output)?;
    write_rows(staged.file_mut(), &rows)?;
    staged.commit()?;

    info!("Wrote {} alignment rows to {}", rows.len(), output.display());
    Ok(rows.len())
}
