//! Report model, chart rendering and output formatting

pub mod charts;
pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::{ReportBundle, Section};
