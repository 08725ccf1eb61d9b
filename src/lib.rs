pub mod bio;
pub mod cli;
pub mod core;
pub mod processing;
pub mod report;
pub mod utils;

mod error;

pub use crate::bio::alignment::parse_blast;
pub use crate::core::Config;
pub use crate::processing::{find_best_blast, BestHitSelector, Criterion};
pub use crate::report::{mapping_analysis, EnzymeCompoundAggregator, MatchReport};
pub use error::{BioPathPredError, BioPathPredResult};
