//! Resume text normalization

use crate::error::Result;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Cleans extracted text while keeping line structure, which section
/// splitting depends on.
pub struct TextNormalizer {
    inline_whitespace: Regex,
    blank_lines: Regex,
    repeated_punct: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inline_whitespace: Regex::new(r"[ \t\u{00A0}\u{000C}]+")?,
            blank_lines: Regex::new(r"\n{3,}")?,
            repeated_punct: Regex::new(r"[.!?]{4,}")?,
        })
    }

    pub fn normalize(&self, text: &str) -> String {
        let unified = normalize_unicode(&text.replace("\r\n", "\n").replace('\r', "\n"));

        let lines: Vec<String> = unified
            .lines()
            .map(|line| self.inline_whitespace.replace_all(line, " ").trim().to_string())
            .collect();
        let joined = lines.join("\n");

        let collapsed = self.blank_lines.replace_all(&joined, "\n\n");
        // Dot leaders from PDF tables of contents
        self.repeated_punct.replace_all(&collapsed, " ").trim().to_string()
    }
}

/// Map typographic characters onto their ASCII forms.
fn normalize_unicode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' | '\u{25CF}' | '\u{25AA}' => '-',
            '\u{2026}' => '.',
            _ => c,
        })
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}
