//! Error handling for the placement matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacementError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The upstream PDF collaborator failed; the message is shown to the user as-is.
    #[error("{0}")]
    PdfExtraction(String),

    #[error("No extractable text: {0}")]
    NoExtractableText(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Application error: {0}")]
    Application(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl PlacementError {
    /// Errors caused by the user's file rather than by the program.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PlacementError::NoExtractableText(_)
                | PlacementError::UnsupportedFormat(_)
                | PlacementError::FileTooLarge { .. }
                | PlacementError::InvalidInput(_)
        )
    }

    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, PlacementError::PdfExtraction(_))
    }
}

pub type Result<T> = std::result::Result<T, PlacementError>;

/// Convert anyhow errors to our custom error type.
///
/// The context chain is kept in the message. A chain rooted in a
/// configuration error stays a configuration error.
impl From<anyhow::Error> for PlacementError {
    fn from(err: anyhow::Error) -> Self {
        let message = err
            .chain()
            .map(|cause| match cause.downcast_ref::<PlacementError>() {
                Some(PlacementError::Configuration(detail)) => detail.clone(),
                _ => cause.to_string(),
            })
            .collect::<Vec<_>>()
            .join(": ");

        match err.root_cause().downcast_ref::<PlacementError>() {
            Some(PlacementError::Configuration(_)) => PlacementError::Configuration(message),
            _ => PlacementError::AnalysisFailed(message),
        }
    }
}
