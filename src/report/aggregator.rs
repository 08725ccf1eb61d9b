//! Cross-report statistics and organism ranking
//!
//! An [`EnzymeCompoundAggregator`] owns the per-key value lists of exactly one run.
//! Build a new one for every run; [`EnzymeCompoundAggregator::finish`] consumes it.

use crate::report::match_report::{MatchReport, Section};
use crate::report::writer;
use crate::utils::files::find_in_dir;
use crate::{BioPathPredError, BioPathPredResult};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Compound scored for the prediction table unless configured otherwise
pub const DEFAULT_RANKING_KEY: &str = "iaa";

/// Handling of a report that lacks the ranking key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// Fail the run before any table is written
    #[default]
    Abort,
    /// Leave the organism out of the ranking and log a warning
    Skip,
}

/// Summary statistics of one key across every report of a run
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStat {
    pub key: String,
    pub total: f64,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    /// Sample standard deviation; 0.0 when fewer than two values were seen
    pub stdev: f64,
    pub samples: usize,
}

impl AggregateStat {
    pub fn from_values(key: &str, values: &[f64]) -> Self {
        let n = values.len();
        let total: f64 = values.iter().sum();
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = if n == 0 { 0.0 } else { total / n as f64 };

        let stdev = if n < 2 {
            0.0
        } else {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (n - 1) as f64).sqrt()
        };

        Self {
            key: key.to_string(),
            total,
            max,
            min,
            mean,
            stdev,
            samples: n,
        }
    }
}

/// One organism's score for the ranking key
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub species: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub ranking_key: String,
    pub on_missing_key: MissingKeyPolicy,
    /// Glob, relative to the input directory, selecting report files
    pub report_pattern: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            ranking_key: DEFAULT_RANKING_KEY.to_string(),
            on_missing_key: MissingKeyPolicy::default(),
            report_pattern: "**/*.txt".to_string(),
        }
    }
}

/// The three tables of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutput {
    pub compound_summary: Vec<AggregateStat>,
    pub enzyme_summary: Vec<AggregateStat>,
    pub ranking: Vec<PredictionRow>,
    pub report_count: usize,
}

#[derive(Debug, Default)]
pub struct EnzymeCompoundAggregator {
    reports: Vec<MatchReport>,
    compound_values: IndexMap<String, Vec<f64>>,
    enzyme_values: IndexMap<String, Vec<f64>>,
}

impl EnzymeCompoundAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a report into the run; reports are ranked in the order they are added
    pub fn add_report(&mut self, report: MatchReport) {
        for section in [Section::Compound, Section::Enzyme] {
            let values = match section {
                Section::Compound => &mut self.compound_values,
                Section::Enzyme => &mut self.enzyme_values,
            };
            for (key, value) in report.scores(section) {
                values.entry(key.clone()).or_default().push(*value);
            }
        }
        self.reports.push(report);
    }

    pub fn reports(&self) -> &[MatchReport] {
        &self.reports
    }

    /// Values seen so far for every key of a section, in first-seen key order
    pub fn values(&self, section: Section) -> &IndexMap<String, Vec<f64>> {
        match section {
            Section::Compound => &self.compound_values,
            Section::Enzyme => &self.enzyme_values,
        }
    }

    pub fn summary(&self, section: Section) -> Vec<AggregateStat> {
        self.values(section)
            .iter()
            .map(|(key, values)| {
                if values.len() < 2 {
                    warn!(
                        "Standard deviation of {} '{}' is undefined for {} sample(s), writing 0",
                        section.name(),
                        key,
                        values.len()
                    );
                }
                AggregateStat::from_values(key, values)
            })
            .collect()
    }

    pub fn compound_summary(&self) -> Vec<AggregateStat> {
        self.summary(Section::Compound)
    }

    pub fn enzyme_summary(&self) -> Vec<AggregateStat> {
        self.summary(Section::Enzyme)
    }

    /// Organisms sorted by descending score of compound `key`; ties keep report order
    pub fn prediction_ranking(
        &self,
        key: &str,
        policy: MissingKeyPolicy,
    ) -> BioPathPredResult<Vec<PredictionRow>> {
        let mut rows = Vec::with_capacity(self.reports.len());

        for report in &self.reports {
            match report.compound_score(key) {
                Some(score) => rows.push(PredictionRow {
                    species: report.name().to_string(),
                    score,
                }),
                None if policy == MissingKeyPolicy::Skip => {
                    warn!("Report '{}' has no '{}' score, leaving it out of the ranking", report.name(), key);
                }
                None => {
                    return Err(BioPathPredError::MissingKey {
                        key: key.to_string(),
                        report: report.name().to_string(),
                    })
                }
            }
        }

        // Stable, so equal scores stay in report order
        rows.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(rows)
    }

    /// Build all three tables, ending the run
    pub fn finish(self, key: &str, policy: MissingKeyPolicy) -> BioPathPredResult<AnalysisOutput> {
        let ranking = self.prediction_ranking(key, policy)?;
        Ok(AnalysisOutput {
            compound_summary: self.compound_summary(),
            enzyme_summary: self.enzyme_summary(),
            ranking,
            report_count: self.reports.len(),
        })
    }
}

/// Parse report files in parallel, keeping the order of `paths`.
///
/// When several files fail, the error of the first one in `paths` is returned.
pub fn collect_reports(paths: &[PathBuf]) -> BioPathPredResult<Vec<MatchReport>> {
    let parsed: Vec<BioPathPredResult<MatchReport>> = paths
        .par_iter()
        .map(|path| MatchReport::from_path(path))
        .collect();
    parsed.into_iter().collect()
}

/// Summarize every match report under `input_dir` into `output_dir`.
///
/// Either all three tables are written or, on any error, none of them.
pub fn mapping_analysis(
    input_dir: &Path,
    output_dir: &Path,
    options: &AnalysisOptions,
) -> BioPathPredResult<AnalysisOutput> {
    let paths = find_in_dir(input_dir, &options.report_pattern)?;
    if paths.is_empty() {
        warn!("No match reports matching '{}' under {}", options.report_pattern, input_dir.display());
    }
    info!("Summarizing {} match reports", paths.len());

    let reports = collect_reports(&paths)?;

    let mut aggregator = EnzymeCompoundAggregator::new();
    for report in reports {
        debug!(
            "Report {}: {} compounds, {} enzymes",
            report.name(),
            report.compounds().len(),
            report.enzymes().len()
        );
        aggregator.add_report(report);
    }

    let output = aggregator.finish(&options.ranking_key, options.on_missing_key)?;
    writer::write_analysis(output_dir, &output)?;

    info!(
        "Wrote {} compound, {} enzyme and {} prediction rows to {}",
        output.compound_summary.len(),
        output.enzyme_summary.len(),
        output.ranking.len(),
        output_dir.display()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, compounds: &str) -> MatchReport {
        MatchReport::parse(name, &format!("Compound list:\n{}\n", compounds)).unwrap()
    }

    #[test]
    fn test_aggregate_stat() {
        let stat = AggregateStat::from_values("iaa", &[1.0, 2.0, 3.0]);
        assert_eq!(stat.total, 6.0);
        assert_eq!(stat.max, 3.0);
        assert_eq!(stat.min, 1.0);
        assert_eq!(stat.mean, 2.0);
        assert!((stat.stdev - 1.0).abs() < 1e-12);
        assert_eq!(stat.samples, 3);
    }

    #[test]
    fn test_single_sample_stdev_sentinel() {
        let stat = AggregateStat::from_values("iaa", &[4.5]);
        assert_eq!(stat.total, 4.5);
        assert_eq!(stat.mean, 4.5);
        assert_eq!(stat.stdev, 0.0);
    }

    #[test]
    fn test_values_accumulate_in_report_order() {
        let mut aggregator = EnzymeCompoundAggregator::new();
        aggregator.add_report(report("a", "iaa: 1\ntam: 2"));
        aggregator.add_report(report("b", "ipa: 5\niaa: 3"));

        let values = aggregator.values(Section::Compound);
        let keys: Vec<&str> = values.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["iaa", "tam", "ipa"]);
        assert_eq!(values["iaa"], vec![1.0, 3.0]);
    }

    #[test]
    fn test_ranking_descending() {
        let mut aggregator = EnzymeCompoundAggregator::new();
        aggregator.add_report(report("low", "iaa: 0.5"));
        aggregator.add_report(report("high", "iaa: 2.0"));
        aggregator.add_report(report("mid", "iaa: 1.0"));

        let ranking = aggregator
            .prediction_ranking(DEFAULT_RANKING_KEY, MissingKeyPolicy::Abort)
            .unwrap();
        let species: Vec<&str> = ranking.iter().map(|r| r.species.as_str()).collect();
        assert_eq!(species, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ranking_ties_keep_report_order() {
        let mut aggregator = EnzymeCompoundAggregator::new();
        for name in ["first", "second", "third"] {
            aggregator.add_report(report(name, "iaa: 1.0"));
        }

        let ranking = aggregator.prediction_ranking("iaa", MissingKeyPolicy::Abort).unwrap();
        let species: Vec<&str> = ranking.iter().map(|r| r.species.as_str()).collect();
        assert_eq!(species, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_ranking_with_custom_key() {
        let mut aggregator = EnzymeCompoundAggregator::new();
        aggregator.add_report(report("a", "iaa: 3\nipa: 1"));
        aggregator.add_report(report("b", "iaa: 1\nipa: 2"));

        let ranking = aggregator.prediction_ranking("ipa", MissingKeyPolicy::Abort).unwrap();
        assert_eq!(ranking[0].species, "b");
    }

    #[test]
    fn test_missing_key_policies() {
        let mut aggregator = EnzymeCompoundAggregator::new();
        aggregator.add_report(report("a", "iaa: 3"));
        aggregator.add_report(report("b", "tam: 1"));

        match aggregator.prediction_ranking("iaa", MissingKeyPolicy::Abort) {
            Err(BioPathPredError::MissingKey { key, report }) => {
                assert_eq!(key, "iaa");
                assert_eq!(report, "b");
            }
            other => panic!("Expected missing key error, got {:?}", other),
        }

        let ranking = aggregator.prediction_ranking("iaa", MissingKeyPolicy::Skip).unwrap();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].species, "a");
    }

    #[test]
    fn test_fresh_aggregators_do_not_share_state() {
        let build = || {
            let mut aggregator = EnzymeCompoundAggregator::new();
            aggregator.add_report(report("a", "iaa: 1"));
            aggregator.add_report(report("b", "iaa: 2"));
            aggregator.finish("iaa", MissingKeyPolicy::Abort).unwrap()
        };

        let first = build();
        let second = build();
        assert_eq!(first, second);
        assert_eq!(second.compound_summary[0].samples, 2);
    }

    #[test]
    fn test_first_failing_report_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut paths = Vec::new();
        for name in ["a_broken", "b_good", "c_broken", "d_broken"] {
            let path = dir.path().join(format!("{}.txt", name));
            let body = if name.ends_with("broken") {
                "Compound list:\niaa 1\n"
            } else {
                "Compound list:\niaa: 1\n"
            };
            std::fs::write(&path, body).unwrap();
            paths.push(path);
        }

        for _ in 0..20 {
            match collect_reports(&paths) {
                Err(BioPathPredError::MalformedReport { path, .. }) => {
                    assert!(path.ends_with("a_broken.txt"), "got {}", path.display());
                }
                other => panic!("Expected malformed report error, got {:?}", other),
            }
        }
    }
}
