//! Configuration types for biopathpred

use crate::bio::alignment::MalformedPolicy;
use crate::processing::Criterion;
use crate::report::aggregator::{MissingKeyPolicy, DEFAULT_RANKING_KEY};
use crate::BioPathPredError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub parse_blast: ParseBlastConfig,
    #[serde(default)]
    pub best_blast: BestBlastConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseBlastConfig {
    /// What to do with a hit whose title or description does not parse
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BestBlastConfig {
    /// Column maximized within each gene id
    #[serde(default)]
    pub criteria: Criterion,
    /// Row filters applied before selection, e.g. "evalue<=1e-5"
    #[serde(default)]
    pub filter: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Compound key whose score ranks the organisms
    #[serde(default = "default_ranking_key")]
    pub ranking_key: String,
    #[serde(default)]
    pub on_missing_key: MissingKeyPolicy,
    /// Glob, relative to the input directory, selecting match reports
    #[serde(default = "default_report_pattern")]
    pub report_pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceConfig {
    /// Worker threads (0 = all available)
    #[serde(default)]
    pub threads: usize,
}

fn default_ranking_key() -> String { DEFAULT_RANKING_KEY.to_string() }
fn default_report_pattern() -> String { "**/*.txt".to_string() }

impl Default for ParseBlastConfig {
    fn default() -> Self {
        Self {
            on_malformed: MalformedPolicy::default(),
        }
    }
}

impl Default for BestBlastConfig {
    fn default() -> Self {
        Self {
            criteria: Criterion::default(),
            filter: Vec::new(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ranking_key: default_ranking_key(),
            on_missing_key: MissingKeyPolicy::default(),
            report_pattern: default_report_pattern(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { threads: 0 }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, BioPathPredError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BioPathPredError::MissingInput(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| BioPathPredError::Configuration(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), BioPathPredError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| BioPathPredError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
