//! Resume analysis pipeline and the session holding the latest result

use crate::config::{Config, MatchingConfig};
use crate::error::Result;
use crate::input::sections::ResumeText;
use crate::matching::catalog::CompanyCatalog;
use crate::matching::extractor::{DetectedSkillSet, SkillEvidence, SkillExtractor};
use crate::matching::ranking::{overall_score, pooled_missing_skills, rank_companies, RankedCompany, RankingConfig};
use crate::matching::taxonomy::SkillTaxonomy;
use anyhow::Context;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

const SUMMARY_AREAS: usize = 3;

/// Outcome of one analysis run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub generation: u64,
    pub requested_field: String,
    /// Field whose taxonomy was used
    pub field: String,
    pub skills: DetectedSkillSet,
    pub skill_evidence: Vec<SkillEvidence>,
    pub matches: Vec<RankedCompany>,
    /// Missing skills pooled over all ranked companies
    pub missing_skills: Vec<String>,
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub overall_score: u8,
    pub processing_time_ms: u64,
}

pub struct MatchingEngine {
    taxonomy: SkillTaxonomy,
    catalog: CompanyCatalog,
    extractor: SkillExtractor,
    ranking: RankingConfig,
}

impl MatchingEngine {
    pub fn new(
        taxonomy: SkillTaxonomy,
        catalog: CompanyCatalog,
        matching: &MatchingConfig,
        ranking: RankingConfig,
    ) -> Result<Self> {
        taxonomy.validate()?;
        catalog.validate()?;

        let mut extractor = SkillExtractor::new(&taxonomy, matching.match_mode)?
            .with_default_field(matching.default_field.clone());
        if matching.include_related_fields {
            extractor = extractor.with_related_fields(&catalog);
        }

        Ok(Self {
            taxonomy,
            catalog,
            extractor,
            ranking,
        })
    }

    /// Build the engine from configuration, loading a custom taxonomy or
    /// catalog when paths are configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let taxonomy = match &config.matching.taxonomy_path {
            Some(path) => {
                info!("Loading skill taxonomy from {}", path.display());
                SkillTaxonomy::load_from_file(path)
                    .with_context(|| format!("Loading custom skill taxonomy {}", path.display()))?
            }
            None => SkillTaxonomy::default(),
        };
        let catalog = match &config.ranking.catalog_path {
            Some(path) => {
                info!("Loading company catalog from {}", path.display());
                CompanyCatalog::load_from_file(path)
                    .with_context(|| format!("Loading company catalog {}", path.display()))?
            }
            None => CompanyCatalog::default(),
        };
        Self::new(taxonomy, catalog, &config.matching, config.ranking.to_ranking_config())
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn catalog(&self) -> &CompanyCatalog {
        &self.catalog
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    pub fn ranking(&self) -> &RankingConfig {
        &self.ranking
    }

    /// Run extraction and ranking for `field`, tagging the result with `generation`.
    pub fn analyze(&self, resume: &ResumeText, field: &str, generation: u64) -> Result<ResumeAnalysis> {
        let start = Instant::now();
        info!("Starting skill extraction for field: {}", field);

        let extraction = self.extractor.extract_with_evidence(resume, field)?;
        info!("Detected {} skills", extraction.skills.len());

        let jobs = if self.ranking.restrict_to_field {
            self.catalog.jobs_for_field(field)
        } else {
            self.catalog.jobs.clone()
        };
        let matches = rank_companies(&jobs, &extraction.skills, &self.ranking);
        info!("Matched companies: {} of {}", matches.len(), jobs.len());

        let missing_skills = pooled_missing_skills(&matches);
        let strength_areas = extraction.skills.iter().take(SUMMARY_AREAS).map(String::from).collect();
        let improvement_areas = missing_skills.iter().take(SUMMARY_AREAS).cloned().collect();
        let overall_score = overall_score(&matches);

        Ok(ResumeAnalysis {
            generation,
            requested_field: field.to_string(),
            field: extraction.field,
            skills: extraction.skills,
            skill_evidence: extraction.evidence,
            matches,
            missing_skills,
            strength_areas,
            improvement_areas,
            overall_score,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Run [`analyze`](Self::analyze) for `ticket` and hand the result to
    /// `session`. A failure clears the session before it is returned.
    /// Returns whether the result was kept.
    pub fn analyze_in_session(
        &self,
        session: &mut AnalysisSession,
        ticket: AnalysisTicket,
        resume: &ResumeText,
        field: &str,
    ) -> Result<bool> {
        match self.analyze(resume, field, ticket.generation()) {
            Ok(analysis) => Ok(session.complete(analysis)),
            Err(e) => {
                warn!("Analysis for field {} failed: {}", field, e);
                session.fail(ticket);
                Err(e)
            }
        }
    }
}

/// Handle for one in-flight analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Holds the newest analysis only. Results from superseded tickets are dropped.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    issued: u64,
    current: Option<ResumeAnalysis>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new analysis; any earlier ticket becomes stale.
    pub fn begin(&mut self) -> AnalysisTicket {
        self.issued += 1;
        AnalysisTicket {
            generation: self.issued,
        }
    }

    pub fn is_current(&self, ticket: AnalysisTicket) -> bool {
        ticket.generation == self.issued
    }

    /// Store `analysis` if it belongs to the newest ticket. Returns whether it was kept.
    pub fn complete(&mut self, analysis: ResumeAnalysis) -> bool {
        if analysis.generation != self.issued {
            info!(
                "Discarding stale analysis (generation {}, current {})",
                analysis.generation, self.issued
            );
            return false;
        }
        self.current = Some(analysis);
        true
    }

    /// Clear the current result after a failed run of the newest ticket.
    pub fn fail(&mut self, ticket: AnalysisTicket) {
        if self.is_current(ticket) {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ResumeAnalysis> {
        self.current.as_ref()
    }
}
