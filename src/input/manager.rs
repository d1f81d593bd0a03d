//! Routes resume files to the right extractor, with a per-path cache

use crate::error::{CareerMatchError, Result};
use crate::input::file_detector::ResumeFormat;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(cached) = self.cache.get(path) {
            debug!("Using cached text for: {}", path.display());
            return Ok(cached.clone());
        }

        if !path.exists() {
            return Err(CareerMatchError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let format = ResumeFormat::from_path(path)?;
        info!("Reading {:?} resume: {}", format, path.display());
        let text = match format {
            ResumeFormat::Pdf => PdfExtractor.extract(path).await?,
            ResumeFormat::Text => PlainTextExtractor.extract(path).await?,
            ResumeFormat::Markdown => MarkdownExtractor.extract(path).await?,
        };

        self.cache.insert(path.to_path_buf(), text.clone());

        Ok(text)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
