//! Resume text split into labeled sections

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionName {
    Education,
    Experience,
    Skills,
    Projects,
    Other,
}

impl SectionName {
    pub const ALL: [SectionName; 5] = [
        SectionName::Education,
        SectionName::Experience,
        SectionName::Skills,
        SectionName::Projects,
        SectionName::Other,
    ];

    fn heading_patterns(self) -> &'static [&'static str] {
        match self {
            SectionName::Education => &["education", "academic background", "academics", "qualifications"],
            SectionName::Experience => &[
                "experience",
                "work experience",
                "professional experience",
                "employment",
                "work history",
                "internships",
            ],
            SectionName::Skills => &["skills", "technical skills", "core competencies", "expertise", "technologies"],
            SectionName::Projects => &["projects", "academic projects", "portfolio", "notable projects"],
            SectionName::Other => &[],
        }
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionName::Education => write!(f, "education"),
            SectionName::Experience => write!(f, "experience"),
            SectionName::Skills => write!(f, "skills"),
            SectionName::Projects => write!(f, "projects"),
            SectionName::Other => write!(f, "other"),
        }
    }
}

/// Text of one resume, whole and per section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeText {
    pub full_text: String,
    pub sections: BTreeMap<SectionName, String>,
}

impl ResumeText {
    /// Build from raw text, detecting section headings line by line.
    pub fn new(full_text: String) -> Self {
        let sections = split_sections(&full_text);
        Self { full_text, sections }
    }

    pub fn section(&self, name: SectionName) -> Option<&str> {
        self.sections.get(&name).map(|s| s.as_str())
    }

    pub fn is_blank(&self) -> bool {
        self.full_text.trim().is_empty()
    }
}

/// Classify a line as a section heading.
fn heading_for(line: &str) -> Option<SectionName> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > 40 {
        return None;
    }
    let ends_with_colon = trimmed.ends_with(':');
    let normalized = trimmed.trim_end_matches(':').trim().to_lowercase();

    for name in SectionName::ALL {
        for pattern in name.heading_patterns() {
            if normalized == *pattern || (ends_with_colon && normalized.starts_with(pattern)) {
                return Some(name);
            }
        }
    }

    // An unknown "Something:" line on its own starts an "other" block
    if ends_with_colon && !normalized.contains(' ') && normalized.chars().all(char::is_alphabetic) {
        return Some(SectionName::Other);
    }

    None
}

/// Split text into sections. Content before the first heading goes to `Other`;
/// repeated headings append to the same section.
pub fn split_sections(text: &str) -> BTreeMap<SectionName, String> {
    let mut sections: BTreeMap<SectionName, String> = BTreeMap::new();
    let mut current = SectionName::Other;

    for line in text.lines() {
        if let Some(name) = heading_for(line) {
            current = name;
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let entry = sections.entry(current).or_default();
        if !entry.is_empty() {
            entry.push('\n');
        }
        entry.push_str(line.trim());
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_detection() {
        let text = "Jane Student\njane@example.com\n\nEducation:\nB.Tech Computer Science\n\nTechnical Skills:\nPython, SQL\n\nProjects\nChat app in React\n\nWork Experience:\nIntern at Acme";
        let sections = split_sections(text);

        assert_eq!(sections.get(&SectionName::Education).unwrap(), "B.Tech Computer Science");
        assert_eq!(sections.get(&SectionName::Skills).unwrap(), "Python, SQL");
        assert_eq!(sections.get(&SectionName::Projects).unwrap(), "Chat app in React");
        assert_eq!(sections.get(&SectionName::Experience).unwrap(), "Intern at Acme");
        assert!(sections.get(&SectionName::Other).unwrap().contains("Jane Student"));
    }

    #[test]
    fn test_repeated_heading_appends() {
        let text = "Skills:\nRust\nHobbies:\nChess\nSkills:\nGo";
        let sections = split_sections(text);
        assert_eq!(sections.get(&SectionName::Skills).unwrap(), "Rust\nGo");
        assert_eq!(sections.get(&SectionName::Other).unwrap(), "Chess");
    }

    #[test]
    fn test_no_headings_is_all_other() {
        let resume = ResumeText::new("Built apps using ReactJS and Node".to_string());
        assert_eq!(resume.sections.len(), 1);
        assert_eq!(resume.section(SectionName::Other), Some("Built apps using ReactJS and Node"));
        assert!(!resume.is_blank());
    }

    #[test]
    fn test_long_sentence_is_not_heading() {
        assert_eq!(heading_for("Experience with distributed systems and cloud platforms:"), None);
        assert_eq!(heading_for("EXPERIENCE"), Some(SectionName::Experience));
    }

    #[test]
    fn test_section_names_serialize_lowercase() {
        let json = serde_json::to_string(&SectionName::Projects).unwrap();
        assert_eq!(json, "\"projects\"");
    }
}
