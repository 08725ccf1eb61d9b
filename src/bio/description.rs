//! Hit title and UniProt description parsing
//!
//! A hit title is `<accession> <db>|<alignment id>|<entry name> <description>`, and the
//! description follows the UniProt FASTA header convention:
//! `<product> OS=<organism> OX=<taxid> [GN=<gene>] PE=<existence> SV=<version>`.
//! Curated databases prefix the product with `<enzyme id>~~~<enzyme code>~~~`.

use crate::{BioPathPredError, BioPathPredResult};
use once_cell::sync::Lazy;
use regex::Regex;

static DESCRIPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*) OS=(.*) OX=.* PE=([0-9])").expect("valid description regex"));
static GENE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"GN=(.*) PE=").expect("valid gene regex"));

const PRODUCT_DELIMITER: &str = "~~~";

/// Placeholder written for absent optional fields
pub const MISSING_FIELD: &str = "-";

/// Identifier and free text extracted from a hit title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitTitle {
    pub alignment_id: String,
    pub description: String,
}

impl HitTitle {
    /// Split a hit into its alignment id and description.
    ///
    /// Local databases report `gnl|BL_ORD_ID|n` as the hit id and put the original
    /// `sp|P12345|NAME` identifier at the start of the definition; databases built with
    /// `-parse_seqids` report the identifier as the hit id itself.
    pub fn parse(hit_id: &str, hit_def: &str) -> BioPathPredResult<Self> {
        let title = format!("{} {}", hit_id, hit_def);
        let mut parts = title.splitn(3, ' ');

        if let (Some(_), Some(identifier), Some(description)) =
            (parts.next(), parts.next(), parts.next())
        {
            if let Some(alignment_id) = middle_field(identifier) {
                return Ok(Self {
                    alignment_id,
                    description: description.to_string(),
                });
            }
        }

        if let Some(alignment_id) = middle_field(hit_id.trim()) {
            return Ok(Self {
                alignment_id,
                description: hit_def.to_string(),
            });
        }

        Err(BioPathPredError::MalformedTitle(title))
    }
}

/// Middle part of an `a|b|c` identifier
fn middle_field(identifier: &str) -> Option<String> {
    let fields: Vec<&str> = identifier.split('|').collect();
    match fields.as_slice() {
        [_, middle, _] => Some(middle.to_string()),
        _ => None,
    }
}

/// Named fields of a UniProt-style description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniProtDescription {
    pub enzyme_id: Option<String>,
    pub enzyme_code: Option<String>,
    pub product: String,
    pub organism: String,
    pub existence: u8,
    pub gene: Option<String>,
}

impl UniProtDescription {
    pub fn parse(description: &str) -> BioPathPredResult<Self> {
        let captures = DESCRIPTION_RE
            .captures(description)
            .ok_or_else(|| BioPathPredError::MalformedDescription(description.to_string()))?;

        let product = strip_commas(&captures[1]);
        let organism = strip_commas(&captures[2]);
        // The pattern only admits a single ASCII digit here
        let existence = captures[3].as_bytes()[0] - b'0';

        let (enzyme_id, enzyme_code, product) = split_product(&product)?;

        let gene = GENE_RE
            .captures(description)
            .map(|caps| strip_commas(&caps[1]));

        Ok(Self {
            enzyme_id,
            enzyme_code,
            product,
            organism,
            existence,
            gene,
        })
    }
}

/// Split `<enzyme id>~~~<enzyme code>~~~<product>` or a bare product
fn split_product(product: &str) -> BioPathPredResult<(Option<String>, Option<String>, String)> {
    let parts: Vec<&str> = product.split(PRODUCT_DELIMITER).collect();
    match parts.as_slice() {
        [product] => Ok((None, None, product.to_string())),
        [enzyme_id, enzyme_code, product] => Ok((
            Some(enzyme_id.to_string()),
            Some(enzyme_code.to_string()),
            product.to_string(),
        )),
        _ => Err(BioPathPredError::ProductFormat {
            product: product.to_string(),
            parts: parts.len(),
        }),
    }
}

fn strip_commas(text: &str) -> String {
    text.replace(',', "")
}
