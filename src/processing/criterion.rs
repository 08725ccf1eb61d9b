use serde::{Deserialize, Serialize};

/// Column maximized when choosing the best hit of a gene.
///
/// Every criterion is maximized, `Evalue` included, even though a smaller e-value is
/// the better match. Callers wanting the lowest e-value must pre-filter or transform
/// the column themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    #[default]
    Score,
    Evalue,
    #[value(name = "identity_percentage")]
    IdentityPercentage,
    #[value(name = "query_coverage")]
    QueryCoverage,
}

impl Criterion {
    /// Name of the row table column holding this criterion
    pub fn column(&self) -> &'static str {
        match self {
            Criterion::Score => "score",
            Criterion::Evalue => "evalue",
            Criterion::IdentityPercentage => "identity_percentage",
            Criterion::QueryCoverage => "query_coverage",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}
