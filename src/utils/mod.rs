pub mod files;
pub mod parallel;
