//! Weighted match score of detected skills against one posting

use crate::matching::catalog::SkillRequirement;
use crate::matching::extractor::DetectedSkillSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    /// 0 to 100
    pub score: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Score `detected` against weighted `requirements`.
///
/// `score = round(100 * achieved_weight / total_weight)`; a posting whose
/// weights sum to zero scores 0.
pub fn score_match(detected: &DetectedSkillSet, requirements: &[SkillRequirement]) -> MatchScore {
    let mut total_weight = 0.0;
    let mut achieved_weight = 0.0;
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for req in requirements {
        total_weight += req.weight;
        if detected.contains(&req.skill) {
            achieved_weight += req.weight;
            matched.push(req.skill.clone());
        } else {
            missing.push(req.skill.clone());
        }
    }

    let score = if total_weight > 0.0 {
        (100.0 * achieved_weight / total_weight).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    MatchScore {
        score,
        matched,
        missing,
    }
}
