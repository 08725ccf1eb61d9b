//! Match-report parsing, cross-report aggregation and table output

pub mod aggregator;
pub mod match_report;
pub mod writer;

pub use aggregator::{
    mapping_analysis, AggregateStat, AnalysisOptions, AnalysisOutput, EnzymeCompoundAggregator,
    MissingKeyPolicy, PredictionRow,
};
pub use match_report::{MatchReport, Section};
