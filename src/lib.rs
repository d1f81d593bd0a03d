//! Career matcher library

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use dataset::Dataset;
pub use error::{CareerMatchError, Result};
pub use processing::CareerAnalyzer;
