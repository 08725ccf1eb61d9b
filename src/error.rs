//! Error types for biopathpred

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for biopathpred operations
#[derive(Error, Debug)]
pub enum BioPathPredError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot find '{}'", .0.display())]
    MissingInput(PathBuf),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed query descriptor: '{0}'")]
    MalformedQuery(String),

    #[error("Malformed hit title: '{0}'")]
    MalformedTitle(String),

    #[error("Malformed description (expected '<product> OS=<organism> OX=<id> PE=<digit>'): '{0}'")]
    MalformedDescription(String),

    #[error("Product parsing error: '{product}' splits into {parts} parts, expected 1 or 3")]
    ProductFormat { product: String, parts: usize },

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        value: String,
        row: usize,
    },

    #[error("Invalid filter expression: '{0}'")]
    InvalidFilter(String),

    #[error("Malformed report line {line_number} in {}: '{line}'", .path.display())]
    MalformedReport {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("Key '{key}' not found in report '{report}'")]
    MissingKey { key: String, report: String },

    #[error("Inputs '{}' and '{}' would both be written to '{}'", .first.display(), .second.display(), .target.display())]
    OutputCollision {
        first: PathBuf,
        second: PathBuf,
        target: PathBuf,
    },

    #[error("Parsing error: {0}")]
    Parse(String),
}

/// Result type alias for biopathpred operations
pub type BioPathPredResult<T> = Result<T, BioPathPredError>;

impl BioPathPredError {
    /// Whether the error comes from malformed input text rather than I/O or setup
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            BioPathPredError::Xml(_)
                | BioPathPredError::Csv(_)
                | BioPathPredError::MalformedQuery(_)
                | BioPathPredError::MalformedTitle(_)
                | BioPathPredError::MalformedDescription(_)
                | BioPathPredError::ProductFormat { .. }
                | BioPathPredError::MissingColumn(_)
                | BioPathPredError::InvalidValue { .. }
                | BioPathPredError::InvalidFilter(_)
                | BioPathPredError::MalformedReport { .. }
                | BioPathPredError::MissingKey { .. }
                | BioPathPredError::Parse(_)
        )
    }
}

impl From<quick_xml::DeError> for BioPathPredError {
    fn from(err: quick_xml::DeError) -> Self {
        BioPathPredError::Xml(err.to_string())
    }
}

impl From<csv::Error> for BioPathPredError {
    fn from(err: csv::Error) -> Self {
        BioPathPredError::Csv(err.to_string())
    }
}

impl From<tempfile::PersistError> for BioPathPredError {
    fn from(err: tempfile::PersistError) -> Self {
        BioPathPredError::Io(err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let missing = BioPathPredError::MissingInput(PathBuf::from("sample.xml"));
        assert_eq!(format!("{}", missing), "Cannot find 'sample.xml'");

        let product = BioPathPredError::ProductFormat {
            product: "a~~~b".to_string(),
            parts: 2,
        };
        assert_eq!(
            format!("{}", product),
            "Product parsing error: 'a~~~b' splits into 2 parts, expected 1 or 3"
        );

        let key = BioPathPredError::MissingKey {
            key: "iaa".to_string(),
            report: "ecoli".to_string(),
        };
        assert_eq!(format!("{}", key), "Key 'iaa' not found in report 'ecoli'");

        let report = BioPathPredError::MalformedReport {
            path: PathBuf::from("x.txt"),
            line_number: 3,
            line: "iaa 2.5".to_string(),
        };
        assert_eq!(
            format!("{}", report),
            "Malformed report line 3 in x.txt: 'iaa 2.5'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: BioPathPredError = io_err.into();

        match err {
            BioPathPredError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_parse_error_classification() {
        assert!(BioPathPredError::MalformedDescription("x".to_string()).is_parse_error());
        assert!(BioPathPredError::InvalidFilter("x".to_string()).is_parse_error());
        assert!(!BioPathPredError::Configuration("x".to_string()).is_parse_error());
        assert!(!BioPathPredError::MissingInput(PathBuf::from("x")).is_parse_error());
    }
}
