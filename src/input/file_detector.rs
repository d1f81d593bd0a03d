//! Resume format detection

use crate::error::{CareerMatchError, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Text,
    Markdown,
}

impl ResumeFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(ResumeFormat::Pdf),
            "txt" | "text" => Some(ResumeFormat::Text),
            "md" | "markdown" => Some(ResumeFormat::Markdown),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| CareerMatchError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Self::from_extension(extension).ok_or_else(|| {
            CareerMatchError::UnsupportedFormat(format!(
                "Unsupported resume type '.{}' for: {}",
                extension,
                path.display()
            ))
        })
    }
}
