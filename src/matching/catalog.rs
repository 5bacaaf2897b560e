//! Company job postings with weighted skill requirements

use crate::error::{PlacementError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: String,
    /// Importance of the skill for the posting, 0.0 to 1.0
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub company_id: String,
    pub company_name: String,
    pub position: String,
    /// Career fields this posting recruits for
    pub fields: Vec<String>,
    pub location: String,
    pub salary_range: String,
    pub requirements: Vec<SkillRequirement>,
    pub description: String,
}

impl JobRequirement {
    pub fn recruits_for(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn required_skills(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(|r| r.skill.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyCatalog {
    pub jobs: Vec<JobRequirement>,
}

impl CompanyCatalog {
    pub fn new(jobs: Vec<JobRequirement>) -> Self {
        Self { jobs }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn find(&self, company_id: &str) -> Option<&JobRequirement> {
        self.jobs.iter().find(|j| j.company_id == company_id)
    }

    /// Postings that recruit for `field`, in catalog order.
    pub fn jobs_for_field(&self, field: &str) -> Vec<JobRequirement> {
        self.jobs
            .iter()
            .filter(|j| j.recruits_for(field))
            .cloned()
            .collect()
    }

    /// Fields that appear next to `field` in at least one posting's field list.
    /// First-seen order, `field` itself excluded.
    pub fn related_fields(&self, field: &str) -> Vec<String> {
        let mut related: Vec<String> = Vec::new();
        for job in self.jobs.iter().filter(|j| j.recruits_for(field)) {
            for other in &job.fields {
                if other != field && !related.contains(other) {
                    related.push(other.clone());
                }
            }
        }
        related
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlacementError::Configuration(format!(
                "Failed to read company catalog '{}': {}",
                path.display(),
                e
            ))
        })?;
        let catalog: CompanyCatalog = serde_json::from_str(&content).map_err(|e| {
            PlacementError::Configuration(format!(
                "Failed to parse company catalog '{}': {}",
                path.display(),
                e
            ))
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        for (idx, job) in self.jobs.iter().enumerate() {
            if job.company_id.trim().is_empty() {
                return Err(PlacementError::Configuration(format!(
                    "Catalog entry {} has an empty company_id",
                    idx
                )));
            }
            if self.jobs[..idx].iter().any(|j| j.company_id == job.company_id) {
                return Err(PlacementError::Configuration(format!(
                    "Duplicate company_id '{}' in catalog",
                    job.company_id
                )));
            }
            for req in &job.requirements {
                if !req.weight.is_finite() || !(0.0..=1.0).contains(&req.weight) {
                    return Err(PlacementError::Configuration(format!(
                        "Requirement '{}' of '{}' has weight {} outside 0.0..=1.0",
                        req.skill, job.company_id, req.weight
                    )));
                }
            }
        }
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn job(
    company_id: &str,
    company_name: &str,
    position: &str,
    fields: &[&str],
    requirements: &[(&str, f64)],
    description: &str,
    location: &str,
    salary_range: &str,
) -> JobRequirement {
    JobRequirement {
        company_id: company_id.to_string(),
        company_name: company_name.to_string(),
        position: position.to_string(),
        fields: fields.iter().map(|f| f.to_string()).collect(),
        location: location.to_string(),
        salary_range: salary_range.to_string(),
        requirements: requirements
            .iter()
            .map(|(skill, weight)| SkillRequirement {
                skill: skill.to_string(),
                weight: *weight,
            })
            .collect(),
        description: description.to_string(),
    }
}

impl Default for CompanyCatalog {
    fn default() -> Self {
        Self::new(vec![
            job(
                "tech-solutions-inc",
                "Tech Solutions Inc",
                "Full Stack Developer",
                &["Software Development", "Frontend Development", "Backend Development"],
                &[("JavaScript", 0.9), ("React", 0.8), ("Node.js", 0.8), ("SQL", 0.7), ("Git", 0.6), ("AWS", 0.5)],
                "Leading tech company specializing in web applications",
                "Remote",
                "$90,000 - $130,000",
            ),
            job(
                "data-insights-ai",
                "Data Insights AI",
                "Data Scientist",
                &["Data Science"],
                &[
                    ("Python", 0.9),
                    ("Machine Learning", 0.9),
                    ("Statistics", 0.8),
                    ("SQL", 0.7),
                    ("TensorFlow", 0.6),
                    ("Pandas", 0.6),
                    ("Scikit-learn", 0.5),
                ],
                "AI research and development company focused on machine learning solutions",
                "New York",
                "$100,000 - $150,000",
            ),
            job(
                "frontend-masters",
                "Frontend Masters",
                "Senior Frontend Developer",
                &["Frontend Development", "Software Development"],
                &[("JavaScript", 0.9), ("React", 0.9), ("TypeScript", 0.8), ("CSS", 0.8), ("HTML", 0.7), ("Vue.js", 0.6)],
                "Leading e-commerce platform focusing on user experience",
                "San Francisco",
                "$120,000 - $160,000",
            ),
            job(
                "cloud-systems-pro",
                "Cloud Systems Pro",
                "Backend Engineer",
                &["Backend Development", "Software Development"],
                &[("Java", 0.9), ("Spring Boot", 0.8), ("SQL", 0.8), ("Microservices", 0.7), ("Docker", 0.7), ("Kubernetes", 0.6)],
                "Enterprise cloud solutions provider",
                "Austin",
                "$95,000 - $140,000",
            ),
            job(
                "ai-research-labs",
                "AI Research Labs",
                "Machine Learning Engineer",
                &["Data Science", "Software Development"],
                &[("Python", 0.9), ("TensorFlow", 0.9), ("Machine Learning", 0.8), ("Deep Learning", 0.8), ("NLP", 0.7), ("SQL", 0.6)],
                "Cutting-edge AI research company",
                "Boston",
                "$130,000 - $180,000",
            ),
            job(
                "innovative-web-solutions",
                "Innovative Web Solutions",
                "Frontend Developer",
                &["Frontend Development"],
                &[("React", 0.9), ("TypeScript", 0.8), ("CSS", 0.8), ("HTML", 0.7), ("Jest", 0.6), ("GraphQL", 0.5)],
                "Digital agency specializing in modern web applications",
                "Chicago",
                "$85,000 - $120,000",
            ),
        ])
    }
}
