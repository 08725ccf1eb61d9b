// Row processing: best-hit selection and its filters

pub mod best_hit;
pub mod criterion;
pub mod filter;

pub use best_hit::{find_best_blast, BestHitSelector, Table};
pub use criterion::Criterion;
pub use filter::RowFilter;
