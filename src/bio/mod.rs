pub mod alignment;
pub mod blast_xml;
pub mod description;
pub mod query;

pub use alignment::{parse_blast, AlignmentRow, MalformedPolicy, ParseOptions};
pub use blast_xml::{BlastOutput, BlastRecord};
pub use description::{HitTitle, UniProtDescription};
pub use query::AlignmentQuery;
