//! NCBI BLAST XML (`-outfmt 5`) record model
//!
//! Only the elements the row builder needs are modelled; everything else in the
//! document is ignored by the deserializer.

use crate::BioPathPredResult;
use serde::Deserialize;
use std::io::BufRead;

/// Root `BlastOutput` element
#[derive(Debug, Deserialize)]
pub struct BlastOutput {
    #[serde(rename = "BlastOutput_program", default)]
    pub program: String,
    #[serde(rename = "BlastOutput_iterations", default)]
    pub iterations: Iterations,
}

#[derive(Debug, Deserialize, Default)]
pub struct Iterations {
    #[serde(rename = "Iteration", default)]
    pub records: Vec<BlastRecord>,
}

/// One query and all of its hits
#[derive(Debug, Deserialize)]
pub struct BlastRecord {
    #[serde(rename = "Iteration_query-def")]
    pub query_def: String,
    #[serde(rename = "Iteration_query-len")]
    pub query_len: u64,
    #[serde(rename = "Iteration_hits", default)]
    pub hits: Hits,
}

#[derive(Debug, Deserialize, Default)]
pub struct Hits {
    #[serde(rename = "Hit", default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    #[serde(rename = "Hit_id")]
    pub id: String,
    #[serde(rename = "Hit_def", default)]
    pub def: String,
    #[serde(rename = "Hit_hsps", default)]
    pub hsps: Hsps,
}

#[derive(Debug, Deserialize, Default)]
pub struct Hsps {
    #[serde(rename = "Hsp", default)]
    pub hsps: Vec<Hsp>,
}

/// A high-scoring pair
#[derive(Debug, Deserialize)]
pub struct Hsp {
    #[serde(rename = "Hsp_bit-score")]
    pub bit_score: f64,
    #[serde(rename = "Hsp_evalue")]
    pub evalue: f64,
    #[serde(rename = "Hsp_identity")]
    pub identity: u64,
    #[serde(rename = "Hsp_gaps", default)]
    pub gaps: u64,
    #[serde(rename = "Hsp_align-len")]
    pub align_len: u64,
}

impl BlastOutput {
    pub fn from_reader<R: BufRead>(reader: R) -> BioPathPredResult<Self> {
        Ok(quick_xml::de::from_reader(reader)?)
    }

    pub fn parse_str(xml: &str) -> BioPathPredResult<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    pub fn records(&self) -> &[BlastRecord] {
        &self.iterations.records
    }
}
