//! Query descriptors written by the gene predictor
//!
//! Prodigal names each predicted protein `<id> # <start> # <end> # <strand> # <attributes>`
//! and BLAST carries that string through as the query definition.

use crate::{BioPathPredError, BioPathPredResult};

/// A predicted gene, as described by its query definition line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentQuery {
    pub id: String,
    pub start: u64,
    pub end: u64,
    pub strand: i8,
    /// Trailing attribute text (`ID=1_1;partial=00;...`), kept verbatim
    pub frame: String,
}

impl AlignmentQuery {
    pub fn parse(descriptor: &str) -> BioPathPredResult<Self> {
        let fields: Vec<&str> = descriptor.split('#').map(|f| f.trim_matches(' ')).collect();
        let [id, start, end, strand, frame] = fields.as_slice() else {
            return Err(BioPathPredError::MalformedQuery(descriptor.to_string()));
        };

        let malformed = || BioPathPredError::MalformedQuery(descriptor.to_string());
        Ok(Self {
            id: id.to_string(),
            start: start.parse().map_err(|_| malformed())?,
            end: end.parse().map_err(|_| malformed())?,
            strand: strand.parse().map_err(|_| malformed())?,
            frame: frame.to_string(),
        })
    }
}
