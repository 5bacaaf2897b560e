//! Input processing module
//! Handles file detection, text extraction, normalization and section splitting

pub mod file_detector;
pub mod manager;
pub mod normalizer;
pub mod sections;
pub mod text_extractor;

pub use manager::InputManager;
pub use sections::{ResumeText, SectionName};
