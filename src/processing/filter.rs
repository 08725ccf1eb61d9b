//! Numeric row filters applied before best-hit selection

use crate::{BioPathPredError, BioPathPredResult};
use once_cell::sync::Lazy;
use regex::Regex;

static FILTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*(<=|>=|==|!=|<|>)\s*(\S+)\s*$")
        .expect("valid filter regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Comparison {
    fn symbol(&self) -> &'static str {
        match self {
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Eq => "==",
            Comparison::Ne => "!=",
        }
    }

    fn holds(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
        }
    }
}

/// `<column><op><number>`, e.g. `evalue<=1e-5`
#[derive(Debug, Clone, PartialEq)]
pub struct RowFilter {
    pub column: String,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl RowFilter {
    pub fn parse(expression: &str) -> BioPathPredResult<Self> {
        let invalid = || BioPathPredError::InvalidFilter(expression.to_string());
        let caps = FILTER_RE.captures(expression).ok_or_else(invalid)?;

        let comparison = match &caps[2] {
            "<" => Comparison::Lt,
            "<=" => Comparison::Le,
            ">" => Comparison::Gt,
            ">=" => Comparison::Ge,
            "==" => Comparison::Eq,
            "!=" => Comparison::Ne,
            _ => return Err(invalid()),
        };
        let threshold: f64 = caps[3].parse().map_err(|_| invalid())?;

        Ok(Self {
            column: caps[1].to_string(),
            comparison,
            threshold,
        })
    }

    pub fn parse_all<S: AsRef<str>>(expressions: &[S]) -> BioPathPredResult<Vec<Self>> {
        expressions.iter().map(|e| Self::parse(e.as_ref())).collect()
    }

    pub fn accepts(&self, value: f64) -> bool {
        self.comparison.holds(value, self.threshold)
    }
}

impl std::fmt::Display for RowFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.column, self.comparison.symbol(), self.threshold)
    }
}
