//! Error handling for the career matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerMatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction error: {0}")]
    TextExtraction(String),

    #[error("No job listings data available")]
    NoData,

    #[error("No candidate skills provided")]
    NoSkills,

    #[error("No listings match role filter {}", .role.as_deref().unwrap_or("<none>"))]
    InsufficientData { role: Option<String> },

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, CareerMatchError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CareerMatchError {
    fn from(err: anyhow::Error) -> Self {
        CareerMatchError::Processing(err.to_string())
    }
}

impl CareerMatchError {
    /// Whether this error means "nothing to analyze" rather than a fault.
    pub fn is_data_shortage(&self) -> bool {
        matches!(
            self,
            CareerMatchError::NoData
                | CareerMatchError::NoSkills
                | CareerMatchError::InsufficientData { .. }
        )
    }
}
