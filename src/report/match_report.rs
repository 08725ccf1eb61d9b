//! Per-organism enzyme/compound match reports
//!
//! ```text
//! Compound list:
//! iaa: 2.5
//! tryptamine: True
//!
//! Enzyme list:
//! 4.1.1.74: 1.0
//! ```

use crate::{BioPathPredError, BioPathPredResult};
use indexmap::IndexMap;
use std::path::Path;

const COMPOUND_MARKER: &str = "Compound list:";
const ENZYME_MARKER: &str = "Enzyme list:";
const KEY_SEPARATOR: &str = ": ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Compound,
    Enzyme,
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::Compound => "compound",
            Section::Enzyme => "enzyme",
        }
    }
}

/// Scores of one organism, immutable once parsed
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    name: String,
    compounds: IndexMap<String, f64>,
    enzymes: IndexMap<String, f64>,
}

/// A score, or 1.0 / 0.0 for a boolean literal
fn parse_score(value: &str) -> f64 {
    let value = value.trim();
    value
        .parse::<f64>()
        .unwrap_or(if value == "True" { 1.0 } else { 0.0 })
}

impl MatchReport {
    /// Parse report text for the organism `name`
    pub fn parse(name: &str, text: &str) -> BioPathPredResult<Self> {
        Self::parse_from(name, Path::new(name), text)
    }

    /// Read a report file; the organism is the file name without its extension
    pub fn from_path(path: &Path) -> BioPathPredResult<Self> {
        if !path.is_file() {
            return Err(BioPathPredError::MissingInput(path.to_path_buf()));
        }
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = std::fs::read_to_string(path)?;
        Self::parse_from(&name, path, &text)
    }

    fn parse_from(name: &str, source: &Path, text: &str) -> BioPathPredResult<Self> {
        let mut report = Self {
            name: name.to_string(),
            compounds: IndexMap::new(),
            enzymes: IndexMap::new(),
        };
        let mut section = None;

        for (i, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            match line {
                COMPOUND_MARKER => section = Some(Section::Compound),
                ENZYME_MARKER => section = Some(Section::Enzyme),
                "" => {}
                _ => {
                    // Lines before the first section marker carry no scores
                    let Some(section) = section else { continue };

                    let mut parts = line.split(KEY_SEPARATOR);
                    let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                        return Err(BioPathPredError::MalformedReport {
                            path: source.to_path_buf(),
                            line_number: i + 1,
                            line: line.to_string(),
                        });
                    };

                    let scores = match section {
                        Section::Compound => &mut report.compounds,
                        Section::Enzyme => &mut report.enzymes,
                    };
                    scores.insert(key.to_string(), parse_score(value));
                }
            }
        }

        Ok(report)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn compounds(&self) -> &IndexMap<String, f64> {
        &self.compounds
    }

    pub fn enzymes(&self) -> &IndexMap<String, f64> {
        &self.enzymes
    }

    pub fn scores(&self, section: Section) -> &IndexMap<String, f64> {
        match section {
            Section::Compound => &self.compounds,
            Section::Enzyme => &self.enzymes,
        }
    }

    pub fn compound_score(&self, key: &str) -> Option<f64> {
        self.compounds.get(key).copied()
    }
}
