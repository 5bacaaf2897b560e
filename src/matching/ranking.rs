//! Ranking and filtering of scored postings

use crate::matching::catalog::JobRequirement;
use crate::matching::extractor::DetectedSkillSet;
use crate::matching::scorer::{score_match, MatchScore};
use serde::{Deserialize, Serialize};

/// Default relevance threshold: companies scoring at or below it are dropped.
pub const DEFAULT_MIN_SCORE: u8 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Exclusive lower bound on the score of a listed company
    pub min_score: u8,
    /// Only rank postings that recruit for the selected field
    pub restrict_to_field: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            restrict_to_field: true,
        }
    }
}

/// Per-company outcome of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub company_id: String,
    pub score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCompany {
    pub job: JobRequirement,
    pub result: MatchResult,
}

impl RankedCompany {
    pub fn score(&self) -> u8 {
        self.result.score
    }
}

fn to_result(job: &JobRequirement, score: MatchScore) -> MatchResult {
    MatchResult {
        company_id: job.company_id.clone(),
        score: score.score,
        matched_skills: score.matched,
        missing_skills: score.missing,
    }
}

/// Score every posting, keep those above `config.min_score`, best first.
/// Equal scores keep their input order.
pub fn rank_companies(
    jobs: &[JobRequirement],
    detected: &DetectedSkillSet,
    config: &RankingConfig,
) -> Vec<RankedCompany> {
    let mut ranked: Vec<RankedCompany> = jobs
        .iter()
        .map(|job| RankedCompany {
            job: job.clone(),
            result: to_result(job, score_match(detected, &job.requirements)),
        })
        .filter(|company| company.result.score > config.min_score)
        .collect();

    // `sort_by` is stable
    ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));
    ranked
}

/// Rounded mean score of the ranked companies, 0 when none survived.
pub fn overall_score(ranked: &[RankedCompany]) -> u8 {
    if ranked.is_empty() {
        return 0;
    }
    let total: u32 = ranked.iter().map(|c| c.result.score as u32).sum();
    (total as f64 / ranked.len() as f64).round() as u8
}

/// Missing skills across all ranked companies, deduplicated, in ranked order.
pub fn pooled_missing_skills(ranked: &[RankedCompany]) -> Vec<String> {
    let mut pooled: Vec<String> = Vec::new();
    for skill in ranked.iter().flat_map(|c| c.result.missing_skills.iter()) {
        if !pooled.contains(skill) {
            pooled.push(skill.clone());
        }
    }
    pooled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::catalog::SkillRequirement;

    fn posting(id: &str, requirements: &[(&str, f64)]) -> JobRequirement {
        JobRequirement {
            company_id: id.to_string(),
            company_name: id.to_uppercase(),
            position: "Engineer".to_string(),
            fields: vec!["Web".to_string()],
            location: "Remote".to_string(),
            salary_range: String::new(),
            requirements: requirements
                .iter()
                .map(|(skill, weight)| SkillRequirement {
                    skill: skill.to_string(),
                    weight: *weight,
                })
                .collect(),
            description: String::new(),
        }
    }

    #[test]
    fn test_stable_ranking_and_threshold() {
        // Scores 90, 30, 90 in input order
        let jobs = vec![
            posting("first", &[("React", 0.9), ("SQL", 0.1)]),
            posting("low", &[("React", 0.3), ("SQL", 0.7)]),
            posting("second", &[("React", 0.9), ("Go", 0.1)]),
        ];
        let detected: DetectedSkillSet = ["React"].into_iter().collect();

        let ranked = rank_companies(&jobs, &detected, &RankingConfig::default());
        let ids: Vec<&str> = ranked.iter().map(|c| c.result.company_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert!(ranked.iter().all(|c| c.score() == 90));
    }

    #[test]
    fn test_sorted_descending() {
        let jobs = vec![
            posting("half", &[("React", 0.5), ("SQL", 0.5)]),
            posting("full", &[("React", 1.0)]),
            posting("most", &[("React", 0.8), ("SQL", 0.2)]),
        ];
        let detected: DetectedSkillSet = ["React"].into_iter().collect();

        let ranked = rank_companies(&jobs, &detected, &RankingConfig::default());
        let scores: Vec<u8> = ranked.iter().map(|c| c.score()).collect();
        assert_eq!(scores, vec![100, 80, 50]);
    }

    #[test]
    fn test_nothing_at_or_below_threshold() {
        let jobs = vec![
            posting("a", &[("React", 0.31), ("SQL", 0.69)]),
            posting("b", &[("React", 0.2), ("SQL", 0.8)]),
            posting("c", &[]),
        ];
        let detected: DetectedSkillSet = ["React"].into_iter().collect();
        let config = RankingConfig {
            min_score: 30,
            restrict_to_field: false,
        };

        let ranked = rank_companies(&jobs, &detected, &config);
        assert!(ranked.iter().all(|c| c.score() > 30));
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_custom_threshold() {
        let jobs = vec![posting("a", &[("React", 0.2), ("SQL", 0.8)])];
        let detected: DetectedSkillSet = ["React"].into_iter().collect();
        let config = RankingConfig {
            min_score: 10,
            ..RankingConfig::default()
        };
        assert_eq!(rank_companies(&jobs, &detected, &config).len(), 1);
    }

    #[test]
    fn test_overall_score() {
        assert_eq!(overall_score(&[]), 0);

        let jobs = vec![
            posting("full", &[("React", 1.0)]),
            posting("most", &[("React", 0.75), ("SQL", 0.25)]),
        ];
        let detected: DetectedSkillSet = ["React"].into_iter().collect();
        let ranked = rank_companies(&jobs, &detected, &RankingConfig::default());
        // (100 + 75) / 2 = 87.5
        assert_eq!(overall_score(&ranked), 88);
    }

    #[test]
    fn test_pooled_missing_skills() {
        let jobs = vec![
            posting("a", &[("React", 0.6), ("SQL", 0.2), ("Git", 0.2)]),
            posting("b", &[("React", 0.6), ("Git", 0.2), ("AWS", 0.2)]),
        ];
        let detected: DetectedSkillSet = ["React"].into_iter().collect();
        let ranked = rank_companies(&jobs, &detected, &RankingConfig::default());
        assert_eq!(pooled_missing_skills(&ranked), vec!["SQL", "Git", "AWS"]);
    }
}
