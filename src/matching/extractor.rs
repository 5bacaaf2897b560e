//! Skill extraction: resume text -> canonical skills of a career field

use crate::error::{PlacementError, Result};
use crate::input::sections::{ResumeText, SectionName};
use crate::matching::catalog::CompanyCatalog;
use crate::matching::taxonomy::{SkillTaxonomy, DEFAULT_FIELD};
use aho_corasick::AhoCorasick;
use log::{debug, error, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strsim::jaro_winkler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every token of a synonym must appear as a standalone word
    WholeWord,
    /// Deprecated: plain case-insensitive containment of the synonym
    Substring,
}

/// Canonical skills detected for one resume-and-field pair. Insertion ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectedSkillSet {
    skills: Vec<String>,
}

impl DetectedSkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    fn insert(&mut self, skill: &str) -> bool {
        if self.contains(skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }
}

impl<S: AsRef<str>> FromIterator<S> for DetectedSkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DetectedSkillSet::new();
        for skill in iter {
            set.insert(skill.as_ref());
        }
        set
    }
}

/// Where a detected skill was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEvidence {
    pub skill: String,
    pub matched_synonym: String,
    pub sections: Vec<SectionName>,
}

/// Result of scanning a resume for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Field whose taxonomy was used, after fallback
    pub field: String,
    pub skills: DetectedSkillSet,
    pub evidence: Vec<SkillEvidence>,
}

struct CompiledPhrase {
    synonym: String,
    tokens: Vec<Regex>,
}

struct CompiledSkill {
    name: String,
    phrases: Vec<CompiledPhrase>,
}

/// Synonyms of one field flattened for the legacy substring scan.
struct SubstringIndex {
    matcher: AhoCorasick,
    /// pattern id -> (skill index, synonym)
    owners: Vec<(usize, String)>,
}

/// Skill extractor built once per taxonomy; extraction never mutates it.
pub struct SkillExtractor {
    compiled: HashMap<String, Vec<CompiledSkill>>,
    substring: HashMap<String, SubstringIndex>,
    field_order: Vec<String>,
    related: HashMap<String, Vec<String>>,
    default_field: String,
    mode: MatchMode,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Build the standalone-word pattern for one lowercase token.
///
/// Tokens like `c++` or `.net` start or end with a non-word character, where
/// `\b` would never match next to whitespace; those sides use an explicit
/// start/end-or-non-word boundary instead.
fn token_pattern(token: &str) -> Result<Regex> {
    let escaped = regex::escape(token);
    let left = match token.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:^|[^\w])",
    };
    let right = match token.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:$|[^\w])",
    };
    Ok(Regex::new(&format!("{}{}{}", left, escaped, right))?)
}

impl SkillExtractor {
    pub fn new(taxonomy: &SkillTaxonomy, mode: MatchMode) -> Result<Self> {
        let mut compiled = HashMap::new();
        let mut substring = HashMap::new();
        let mut field_order = Vec::new();

        for field in &taxonomy.fields {
            let mut skills = Vec::new();
            for entry in field.skills() {
                let mut phrases = Vec::new();
                for synonym in &entry.synonyms {
                    let tokens = synonym
                        .split_whitespace()
                        .map(token_pattern)
                        .collect::<Result<Vec<_>>>()?;
                    if tokens.is_empty() {
                        continue;
                    }
                    phrases.push(CompiledPhrase {
                        synonym: synonym.clone(),
                        tokens,
                    });
                }
                skills.push(CompiledSkill {
                    name: entry.name.clone(),
                    phrases,
                });
            }

            let owners: Vec<(usize, String)> = field
                .skills()
                .enumerate()
                .flat_map(|(idx, entry)| entry.synonyms.iter().map(move |s| (idx, s.clone())))
                .collect();
            let matcher = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(owners.iter().map(|(_, s)| s.as_str()))
                .map_err(|e| {
                    PlacementError::Configuration(format!(
                        "Failed to build substring matcher for '{}': {}",
                        field.name, e
                    ))
                })?;

            substring.insert(field.name.clone(), SubstringIndex { matcher, owners });
            compiled.insert(field.name.clone(), skills);
            field_order.push(field.name.clone());
        }

        Ok(Self {
            compiled,
            substring,
            field_order,
            related: HashMap::new(),
            default_field: DEFAULT_FIELD.to_string(),
            mode,
        })
    }

    /// Scan fields that share a posting with the requested one as well.
    pub fn with_related_fields(mut self, catalog: &CompanyCatalog) -> Self {
        self.related = self
            .field_order
            .iter()
            .map(|field| (field.clone(), catalog.related_fields(field)))
            .collect();
        // Fields only the catalog knows about still get their related list
        for job in &catalog.jobs {
            for field in &job.fields {
                self.related
                    .entry(field.clone())
                    .or_insert_with(|| catalog.related_fields(field));
            }
        }
        self
    }

    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = field.into();
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn skill_count(&self) -> usize {
        self.compiled.values().map(|s| s.len()).sum()
    }

    /// Map a requested field onto one the taxonomy knows.
    ///
    /// Unknown fields fall back to the default field with a warning. Returns
    /// `None` only when the default field is missing too.
    pub fn resolve_field(&self, field: &str) -> Option<&str> {
        if let Some(name) = self.field_order.iter().find(|f| *f == field) {
            return Some(name.as_str());
        }

        let suggestion = self
            .field_order
            .iter()
            .map(|f| (f, jaro_winkler(&f.to_lowercase(), &field.to_lowercase())))
            .filter(|(_, score)| *score >= 0.85)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(f, _)| format!(" (did you mean '{}'?)", f))
            .unwrap_or_default();
        warn!(
            "No skills defined for field: {}{}, defaulting to {}",
            field, suggestion, self.default_field
        );

        match self.field_order.iter().find(|f| **f == self.default_field) {
            Some(name) => Some(name.as_str()),
            None => {
                error!(
                    "Default field '{}' is missing from the taxonomy; no skills can be extracted",
                    self.default_field
                );
                None
            }
        }
    }

    /// Detect the canonical skills of `field` mentioned in `text`.
    pub fn extract_skills(&self, text: &str, field: &str) -> Result<DetectedSkillSet> {
        Ok(self.extract(text, field)?.skills)
    }

    /// Like [`extract_skills`](Self::extract_skills), also recording the
    /// synonym that matched and the sections mentioning each skill.
    pub fn extract_with_evidence(&self, resume: &ResumeText, field: &str) -> Result<Extraction> {
        let mut extraction = self.extract(&resume.full_text, field)?;

        let resolved = extraction.field.clone();
        let scan_fields = self.scan_fields(&resolved, field);
        for evidence in extraction.evidence.iter_mut() {
            for (section, content) in &resume.sections {
                let lower = content.to_lowercase();
                let found = scan_fields
                    .iter()
                    .flat_map(|f| self.scan(&lower, f))
                    .any(|(skill, _)| skill == evidence.skill);
                if found {
                    evidence.sections.push(*section);
                }
            }
        }

        Ok(extraction)
    }

    fn extract(&self, text: &str, field: &str) -> Result<Extraction> {
        if text.trim().is_empty() {
            return Err(PlacementError::NoExtractableText(
                "resume text is empty".to_string(),
            ));
        }

        let Some(resolved) = self.resolve_field(field) else {
            return Ok(Extraction {
                field: field.to_string(),
                skills: DetectedSkillSet::new(),
                evidence: Vec::new(),
            });
        };
        let resolved = resolved.to_string();

        let lower = text.to_lowercase();
        let mut skills = DetectedSkillSet::new();
        let mut evidence = Vec::new();

        for scan_field in self.scan_fields(&resolved, field) {
            debug!("Searching in field: {}", scan_field);
            for (skill, synonym) in self.scan(&lower, scan_field) {
                if skills.insert(skill) {
                    debug!("Found skill: {} (matched: {})", skill, synonym);
                    evidence.push(SkillEvidence {
                        skill: skill.to_string(),
                        matched_synonym: synonym.to_string(),
                        sections: Vec::new(),
                    });
                }
            }
        }

        debug!("Final detected skills: {:?}", skills.as_slice());
        Ok(Extraction {
            field: resolved,
            skills,
            evidence,
        })
    }

    /// The resolved field followed by the fields sharing a posting with the
    /// requested one. Relations follow `requested`, so a field no posting
    /// lists scans only its fallback taxonomy.
    fn scan_fields<'a>(&'a self, resolved: &'a str, requested: &str) -> Vec<&'a str> {
        let mut fields = vec![resolved];
        if let Some(related) = self.related.get(requested) {
            for other in related {
                if self.compiled.contains_key(other) && !fields.contains(&other.as_str()) {
                    fields.push(other.as_str());
                }
            }
        }
        fields
    }

    /// Skills of one field found in lowercase text, with the first matching synonym.
    fn scan<'a>(&'a self, lower: &str, field: &str) -> Vec<(&'a str, &'a str)> {
        match self.mode {
            MatchMode::WholeWord => self.scan_whole_word(lower, field),
            MatchMode::Substring => self.scan_substring(lower, field),
        }
    }

    fn scan_whole_word<'a>(&'a self, lower: &str, field: &str) -> Vec<(&'a str, &'a str)> {
        let Some(skills) = self.compiled.get(field) else {
            return Vec::new();
        };
        skills
            .iter()
            .filter_map(|skill| {
                skill
                    .phrases
                    .iter()
                    .find(|phrase| phrase.tokens.iter().all(|re| re.is_match(lower)))
                    .map(|phrase| (skill.name.as_str(), phrase.synonym.as_str()))
            })
            .collect()
    }

    fn scan_substring<'a>(&'a self, lower: &str, field: &str) -> Vec<(&'a str, &'a str)> {
        let (Some(index), Some(skills)) = (self.substring.get(field), self.compiled.get(field)) else {
            return Vec::new();
        };

        // First synonym (in declaration order) seen for each skill
        let mut first_hit: Vec<Option<usize>> = vec![None; skills.len()];
        for mat in index.matcher.find_overlapping_iter(lower) {
            let pattern = mat.pattern().as_usize();
            let (skill_idx, _) = &index.owners[pattern];
            match first_hit[*skill_idx] {
                Some(existing) if existing <= pattern => {}
                _ => first_hit[*skill_idx] = Some(pattern),
            }
        }

        first_hit
            .iter()
            .enumerate()
            .filter_map(|(idx, hit)| {
                hit.map(|pattern| (skills[idx].name.as_str(), index.owners[pattern].1.as_str()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::taxonomy::FieldTaxonomy;

    fn web_taxonomy() -> SkillTaxonomy {
        SkillTaxonomy::new(vec![
            FieldTaxonomy::new("Web").with_category("core", &[("React", &["react", "reactjs"])]),
        ])
    }

    #[test]
    fn test_reactjs_scenario() {
        let extractor = SkillExtractor::new(&web_taxonomy(), MatchMode::WholeWord).unwrap();
        let skills = extractor
            .extract_skills("Built apps using ReactJS and Node", "Web")
            .unwrap();
        assert_eq!(skills.as_slice(), &["React".to_string()]);
    }

    #[test]
    fn test_empty_text_is_input_error() {
        let extractor = SkillExtractor::new(&web_taxonomy(), MatchMode::WholeWord).unwrap();
        let result = extractor.extract_skills("   \n\t ", "Web");
        assert!(matches!(result, Err(PlacementError::NoExtractableText(_))));
    }

    #[test]
    fn test_multi_word_synonym_is_order_independent() {
        let extractor = SkillExtractor::new(&SkillTaxonomy::default(), MatchMode::WholeWord).unwrap();
        let skills = extractor
            .extract_skills("Wrote a boot loader for the spring festival app", "Backend Development")
            .unwrap();
        assert!(skills.contains("Spring Boot"));
    }

    #[test]
    fn test_multi_word_synonym_needs_every_token() {
        let extractor = SkillExtractor::new(&SkillTaxonomy::default(), MatchMode::WholeWord).unwrap();
        let skills = extractor
            .extract_skills("Organised the spring festival", "Backend Development")
            .unwrap();
        assert!(!skills.contains("Spring Boot"));
    }

    #[test]
    fn test_multi_word_synonym_on_custom_taxonomy() {
        let taxonomy = SkillTaxonomy::new(vec![FieldTaxonomy::new("Data")
            .with_category("ml", &[("Machine Learning", &["machine learning"])])]);
        let extractor = SkillExtractor::new(&taxonomy, MatchMode::WholeWord).unwrap();

        let reordered = extractor
            .extract_skills("Kept learning how every machine works", "Data")
            .unwrap();
        assert_eq!(reordered.as_slice(), &["Machine Learning".to_string()]);

        let partial = extractor.extract_skills("Ran the machine shop", "Data").unwrap();
        assert!(partial.is_empty());
    }

    #[test]
    fn test_whole_word_does_not_match_inside_words() {
        let extractor = SkillExtractor::new(&SkillTaxonomy::default(), MatchMode::WholeWord).unwrap();
        let skills = extractor
            .extract_skills("Fluent in JavaScript", "Software Development")
            .unwrap();
        assert!(skills.contains("JavaScript"));
        assert!(!skills.contains("Java"));
    }

    #[test]
    fn test_substring_mode_matches_inside_words() {
        let extractor = SkillExtractor::new(&SkillTaxonomy::default(), MatchMode::Substring).unwrap();
        let skills = extractor
            .extract_skills("Fluent in JavaScript", "Software Development")
            .unwrap();
        assert!(skills.contains("Java"));
        assert!(skills.contains("JavaScript"));
    }

    #[test]
    fn test_symbol_tokens() {
        let extractor = SkillExtractor::new(&SkillTaxonomy::default(), MatchMode::WholeWord).unwrap();
        let skills = extractor
            .extract_skills("Systems work in C++ and services on .NET", "Software Development")
            .unwrap();
        assert!(skills.contains("C++"));
        assert!(skills.contains("C#"));
    }

    #[test]
    fn test_unknown_field_falls_back_to_default() {
        let extractor = SkillExtractor::new(&SkillTaxonomy::default(), MatchMode::WholeWord).unwrap();
        assert_eq!(extractor.resolve_field("Mobile Development"), Some(DEFAULT_FIELD));
        let skills = extractor.extract_skills("I use git daily", "Mobile Development").unwrap();
        assert!(skills.contains("Git"));
    }

    #[test]
    fn test_missing_default_field_yields_empty_set() {
        let extractor = SkillExtractor::new(&web_taxonomy(), MatchMode::WholeWord).unwrap();
        let skills = extractor.extract_skills("react everywhere", "Nope").unwrap();
        assert!(skills.is_empty());
    }

    #[test]
    fn test_related_fields_cross_pollinate() {
        let taxonomy = SkillTaxonomy::default();
        let text = "Shipped a Fastify service";

        let plain = SkillExtractor::new(&taxonomy, MatchMode::WholeWord).unwrap();
        assert!(!plain.extract_skills(text, "Frontend Development").unwrap().contains("Node.js"));

        let related = SkillExtractor::new(&taxonomy, MatchMode::WholeWord)
            .unwrap()
            .with_related_fields(&CompanyCatalog::default());
        assert!(related.extract_skills(text, "Frontend Development").unwrap().contains("Node.js"));
    }

    #[test]
    fn test_fallback_field_uses_requested_field_relations() {
        let extractor = SkillExtractor::new(&SkillTaxonomy::default(), MatchMode::WholeWord)
            .unwrap()
            .with_related_fields(&CompanyCatalog::default());

        let skills = extractor
            .extract_skills("Designed screens in Figma and wired GraphQL", "Mobile Development")
            .unwrap();
        assert!(!skills.contains("UI/UX"));
        assert!(!skills.contains("GraphQL"));

        let skills = extractor.extract_skills("I use git daily", "Mobile Development").unwrap();
        assert!(skills.contains("Git"));

        let resume = ResumeText::new("Skills:\nFigma, Fastify, Git".to_string());
        let extraction = extractor
            .extract_with_evidence(&resume, "DevOps Engineering")
            .unwrap();
        assert_eq!(extraction.field, DEFAULT_FIELD);
        assert_eq!(extraction.skills.as_slice(), &["Git".to_string()]);
    }

    #[test]
    fn test_only_taxonomy_skills_and_idempotent() {
        let taxonomy = SkillTaxonomy::default();
        let extractor = SkillExtractor::new(&taxonomy, MatchMode::WholeWord)
            .unwrap()
            .with_related_fields(&CompanyCatalog::default());
        let text = "Python, pandas, TensorFlow, Docker, SQL, Kotlin, Rust and React Native";

        let first = extractor.extract_skills(text, "Data Science").unwrap();
        let second = extractor.extract_skills(text, "Data Science").unwrap();
        assert_eq!(first, second);
        for skill in first.iter() {
            assert!(taxonomy.is_canonical(skill), "unexpected skill {}", skill);
        }
    }

    #[test]
    fn test_evidence_records_sections() {
        let extractor = SkillExtractor::new(&SkillTaxonomy::default(), MatchMode::WholeWord).unwrap();
        let resume = ResumeText::new(
            "Skills:\nPython, SQL\n\nProjects:\nFlask dashboard backed by PostgreSQL".to_string(),
        );
        let extraction = extractor
            .extract_with_evidence(&resume, "Software Development")
            .unwrap();

        let python = extraction.evidence.iter().find(|e| e.skill == "Python").unwrap();
        assert_eq!(python.matched_synonym, "python");
        assert_eq!(python.sections, vec![SectionName::Skills, SectionName::Projects]);
        assert_eq!(extraction.field, "Software Development");
    }
}
