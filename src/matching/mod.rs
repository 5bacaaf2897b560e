//! Skill matching: taxonomy lookup, extraction, scoring and ranking

pub mod analysis;
pub mod catalog;
pub mod extractor;
pub mod ranking;
pub mod scorer;
pub mod taxonomy;

pub use analysis::{AnalysisSession, AnalysisTicket, MatchingEngine, ResumeAnalysis};
pub use extractor::{DetectedSkillSet, MatchMode, SkillExtractor};
pub use ranking::{MatchResult, RankedCompany, RankingConfig};
