//! Input manager for resume files

use crate::config::{InputConfig, DEFAULT_MAX_FILE_SIZE};
use crate::error::{PlacementError, Result};
use crate::input::file_detector::FileType;
use crate::input::normalizer::{word_count, TextNormalizer};
use crate::input::sections::ResumeText;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, ResumeText>,
    enable_cache: bool,
    max_file_size: u64,
    normalizer: TextNormalizer,
}

impl InputManager {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cache: HashMap::new(),
            enable_cache: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            normalizer: TextNormalizer::new()?,
        })
    }

    pub fn from_config(config: &InputConfig) -> Result<Self> {
        Ok(Self::new()?
            .with_cache(config.enable_cache)
            .with_max_file_size(config.max_file_size_bytes))
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_file_size(mut self, limit: u64) -> Self {
        self.max_file_size = limit;
        self
    }

    /// Read, normalize and split a resume file.
    pub async fn get_resume_text(&mut self, path: &Path) -> Result<ResumeText> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        let raw = self.extract_text(path).await?;
        let normalized = self.normalizer.normalize(&raw);
        let resume = ResumeText::new(normalized);

        if resume.is_blank() {
            return Err(PlacementError::NoExtractableText(format!(
                "no text could be read from {}",
                path.display()
            )));
        }
        debug!(
            "Extracted {} words in {} sections from {}",
            word_count(&resume.full_text),
            resume.sections.len(),
            path.display()
        );

        if self.enable_cache {
            self.cache.insert(path_str, resume.clone());
        }

        Ok(resume)
    }

    /// Raw text of a supported file, after the existence and size checks.
    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(PlacementError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let size = tokio::fs::metadata(path).await?.len();
        if size > self.max_file_size {
            return Err(PlacementError::FileTooLarge {
                size,
                limit: self.max_file_size,
            });
        }

        match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await
            }
            FileType::Unknown => Err(PlacementError::UnsupportedFormat(format!(
                "Unsupported file type for: {} (expected pdf, txt or md)",
                path.display()
            ))),
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| PlacementError::UnsupportedFormat(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
