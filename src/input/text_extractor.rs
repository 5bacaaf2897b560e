//! Text extraction from resume files

use crate::error::{PlacementError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        // pdf-extract panics on some malformed documents
        let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes))
            .map_err(|_| pdf_failure("the document structure could not be parsed"))?
            .map_err(|e| pdf_failure(&e.to_string()))?;

        if text.trim().is_empty() {
            return Err(PlacementError::PdfExtraction(
                "No text content found in the PDF. Please ensure the PDF contains selectable text.".to_string(),
            ));
        }
        Ok(text)
    }
}

/// Turn a low-level PDF error into a message the user can act on.
fn pdf_failure(detail: &str) -> PlacementError {
    let lower = detail.to_lowercase();
    let message = if lower.contains("encrypt") || lower.contains("password") || lower.contains("decrypt") {
        "The PDF is password protected. Please remove the password protection and try again.".to_string()
    } else {
        format!("The PDF file appears to be corrupted ({}). Please try with a different PDF.", detail)
    };
    PlacementError::PdfExtraction(message)
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        markdown_to_text(&markdown_content)
    }
}

/// Render markdown and strip the resulting tags, keeping one block per line.
pub fn markdown_to_text(markdown: &str) -> Result<String> {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br />", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let tags = Regex::new(r"<[^>]*>")?;
    let clean_text = tags.replace_all(&text, "").replace("&amp;", "&");

    let lines: Vec<&str> = clean_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_headings_survive_as_lines() {
        let text = markdown_to_text("# Skills\n\n- Rust\n- C++ & Go\n\n## Projects\nA *fast* parser").unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["Skills", "Rust", "C++ & Go", "Projects", "A fast parser"]);
    }

    #[test]
    fn test_pdf_failure_messages() {
        let locked = pdf_failure("PDF is encrypted");
        assert!(locked.to_string().contains("password protected"));

        let broken = pdf_failure("invalid xref table");
        assert!(broken.to_string().contains("corrupted"));
        assert!(broken.is_extraction_failure());
    }
}
