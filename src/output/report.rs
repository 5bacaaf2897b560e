//! Report structures built from one resume analysis

use crate::input::sections::SectionName;
use crate::matching::analysis::ResumeAnalysis;
use crate::matching::extractor::MatchMode;
use crate::matching::ranking::RankedCompany;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Scores above this are shown as strong matches.
pub const STRONG_MATCH_SCORE: u8 = 70;

/// Everything the formatters render for one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub summary: ReportSummary,

    /// Detected skills with where they were found
    pub skills: Vec<DetectedSkillRow>,

    /// Ranked companies, best first
    pub companies: Vec<CompanyMatch>,

    /// Missing skills pooled over all listed companies
    pub missing_skills: Vec<String>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Mean score of the listed companies (0-100)
    pub overall_score: u8,
    pub verdict: String,
    pub requested_field: String,
    /// Field whose taxonomy was used
    pub field: String,
    pub skills_detected: usize,
    pub companies_matched: usize,
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedSkillRow {
    pub skill: String,
    pub matched_synonym: String,
    pub sections: Vec<SectionName>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyMatch {
    pub rank: usize,
    pub company_id: String,
    pub company_name: String,
    pub position: String,
    pub location: String,
    pub salary_range: String,
    pub score: u8,
    pub strength: MatchStrength,
    /// Every required skill of the posting, in posting order
    pub required_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub tailoring_tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,
    pub matcher_version: String,
    pub resume_file: String,
    pub generation: u64,
    pub match_mode: MatchMode,
    pub min_score: u8,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrength {
    Strong,
    Moderate,
}

impl MatchStrength {
    pub fn from_score(score: u8) -> Self {
        if score > STRONG_MATCH_SCORE {
            MatchStrength::Strong
        } else {
            MatchStrength::Moderate
        }
    }
}

impl std::fmt::Display for MatchStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrength::Strong => write!(f, "Strong match"),
            MatchStrength::Moderate => write!(f, "Partial match"),
        }
    }
}

impl MatchReport {
    pub fn from_analysis(
        analysis: &ResumeAnalysis,
        resume_file: &str,
        match_mode: MatchMode,
        min_score: u8,
    ) -> Self {
        let companies: Vec<CompanyMatch> = analysis
            .matches
            .iter()
            .enumerate()
            .map(|(idx, ranked)| Self::company_match(idx + 1, ranked))
            .collect();

        let skills = analysis
            .skill_evidence
            .iter()
            .map(|e| DetectedSkillRow {
                skill: e.skill.clone(),
                matched_synonym: e.matched_synonym.clone(),
                sections: e.sections.clone(),
            })
            .collect();

        Self {
            summary: ReportSummary {
                overall_score: analysis.overall_score,
                verdict: Self::verdict(analysis),
                requested_field: analysis.requested_field.clone(),
                field: analysis.field.clone(),
                skills_detected: analysis.skills.len(),
                companies_matched: companies.len(),
                strength_areas: analysis.strength_areas.clone(),
                improvement_areas: analysis.improvement_areas.clone(),
            },
            skills,
            companies,
            missing_skills: analysis.missing_skills.clone(),
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.to_string(),
                generation: analysis.generation,
                match_mode,
                min_score,
                processing_time_ms: analysis.processing_time_ms,
            },
        }
    }

    fn company_match(rank: usize, ranked: &RankedCompany) -> CompanyMatch {
        CompanyMatch {
            rank,
            company_id: ranked.result.company_id.clone(),
            company_name: ranked.job.company_name.clone(),
            position: ranked.job.position.clone(),
            location: ranked.job.location.clone(),
            salary_range: ranked.job.salary_range.clone(),
            score: ranked.score(),
            strength: MatchStrength::from_score(ranked.score()),
            required_skills: ranked.job.required_skills().map(String::from).collect(),
            matched_skills: ranked.result.matched_skills.clone(),
            missing_skills: ranked.result.missing_skills.clone(),
            tailoring_tips: tailoring_tips(&ranked.result.missing_skills),
        }
    }

    fn verdict(analysis: &ResumeAnalysis) -> String {
        if analysis.skills.is_empty() {
            return format!("No {} skills were recognised in this resume", analysis.field);
        }
        if analysis.matches.is_empty() {
            return format!(
                "{} skills detected but no company is a relevant match yet",
                analysis.skills.len()
            );
        }
        match analysis.overall_score {
            80..=100 => "Excellent fit for the listed companies".to_string(),
            60..=79 => "Good fit with a few gaps to close".to_string(),
            _ => "Partial fit; the missing skills below matter most".to_string(),
        }
    }
}

/// One suggestion per missing skill.
pub fn tailoring_tips(missing: &[String]) -> Vec<String> {
    missing
        .iter()
        .map(|skill| format!("Add or highlight your {} experience", skill))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchingConfig;
    use crate::input::sections::ResumeText;
    use crate::matching::analysis::MatchingEngine;
    use crate::matching::catalog::CompanyCatalog;
    use crate::matching::ranking::RankingConfig;
    use crate::matching::taxonomy::SkillTaxonomy;

    fn sample_analysis() -> ResumeAnalysis {
        let engine = MatchingEngine::new(
            SkillTaxonomy::default(),
            CompanyCatalog::default(),
            &MatchingConfig::default(),
            RankingConfig::default(),
        )
        .unwrap();
        let resume = ResumeText::new(
            "Skills:\nJavaScript, TypeScript, React, HTML, CSS, Jest\n\nProjects:\nGraphQL storefront".to_string(),
        );
        engine.analyze(&resume, "Frontend Development", 7).unwrap()
    }

    #[test]
    fn test_report_from_analysis() {
        let analysis = sample_analysis();
        let report = MatchReport::from_analysis(&analysis, "resume.txt", MatchMode::WholeWord, 30);

        assert_eq!(report.summary.overall_score, analysis.overall_score);
        assert_eq!(report.summary.companies_matched, analysis.matches.len());
        assert_eq!(report.metadata.generation, 7);
        assert_eq!(report.companies[0].rank, 1);
        assert!(report.companies.windows(2).all(|w| w[0].score >= w[1].score));
        for company in &report.companies {
            assert_eq!(company.tailoring_tips.len(), company.missing_skills.len());
        }
    }

    #[test]
    fn test_tailoring_tip_wording() {
        let tips = tailoring_tips(&["Vue.js".to_string()]);
        assert_eq!(tips, vec!["Add or highlight your Vue.js experience"]);
    }

    #[test]
    fn test_match_strength_boundary() {
        assert_eq!(MatchStrength::from_score(70), MatchStrength::Moderate);
        assert_eq!(MatchStrength::from_score(71), MatchStrength::Strong);
    }
}
