//! Output formatting module
//!
//! Provides various output formats for batch results.

mod formatter;
mod report;

pub use formatter::{OutputFormat, ResultFormatter};
pub use report::{BatchReport, RequestReport};
