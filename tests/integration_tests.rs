//! Integration tests for the placement matcher

use placement_matcher::config::Config;
use placement_matcher::error::PlacementError;
use placement_matcher::input::{InputManager, SectionName};
use placement_matcher::matching::{AnalysisSession, MatchingEngine};
use placement_matcher::output::formatter::ReportGenerator;
use placement_matcher::output::report::MatchReport;
use placement_matcher::config::OutputFormat;
use std::io::Write;
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new().unwrap();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let resume = manager.get_resume_text(path).await.unwrap();
    assert!(resume.full_text.contains("Jane Doe"));
    assert!(resume.full_text.contains("React"));
    assert!(resume.full_text.contains("Node.js"));
    assert!(resume.section(SectionName::Skills).unwrap_or_default().contains("Node.js"));
    assert!(resume.section(SectionName::Education).is_some());
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new().unwrap();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let resume = manager.get_resume_text(path).await.unwrap();
    assert!(resume.full_text.contains("Software Engineer"));
    assert!(resume.full_text.contains("React"));
    assert!(!resume.full_text.contains("**"));
    assert!(!resume.full_text.contains("##"));
    assert!(resume.section(SectionName::Projects).unwrap_or_default().contains("GraphQL"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new().unwrap();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let first = manager.get_resume_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.get_resume_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new().unwrap();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.get_resume_text(path).await;
    assert!(matches!(result, Err(PlacementError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new().unwrap();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.get_resume_text(path).await;
    assert!(matches!(result, Err(PlacementError::InvalidInput(_))));
}

#[tokio::test]
async fn test_file_above_size_limit() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(&vec![b'a'; 2048]).unwrap();

    let mut manager = InputManager::new().unwrap().with_max_file_size(1024);
    let result = manager.get_resume_text(file.path()).await;
    assert!(matches!(
        result,
        Err(PlacementError::FileTooLarge { size: 2048, limit: 1024 })
    ));
}

#[tokio::test]
async fn test_blank_file_has_no_extractable_text() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"   \n\n\t").unwrap();

    let mut manager = InputManager::new().unwrap();
    let result = manager.get_resume_text(file.path()).await;
    assert!(matches!(result, Err(PlacementError::NoExtractableText(_))));
}

#[tokio::test]
async fn test_corrupted_pdf_is_extraction_failure() {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(b"%PDF-1.4\nthis is not really a pdf").unwrap();

    let mut manager = InputManager::new().unwrap();
    let err = manager.get_resume_text(file.path()).await.unwrap_err();
    assert!(err.is_extraction_failure());
}

#[tokio::test]
async fn test_end_to_end_match() {
    let config = Config::default();
    let engine = MatchingEngine::from_config(&config).unwrap();
    let mut manager = InputManager::from_config(&config.input).unwrap();
    let mut session = AnalysisSession::new();

    let ticket = session.begin();
    let resume = manager
        .get_resume_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let analysis = engine
        .analyze(&resume, "Frontend Development", ticket.generation())
        .unwrap();
    assert!(session.complete(analysis));

    let analysis = session.current().unwrap();
    assert!(analysis.skills.contains("React"));
    assert!(analysis.skills.contains("Jest"));
    assert!(!analysis.matches.is_empty());
    assert!(analysis.matches.iter().all(|m| m.score() > 30));
    assert!(analysis.matches.windows(2).all(|w| w[0].score() >= w[1].score()));

    let react = analysis.skill_evidence.iter().find(|e| e.skill == "React").unwrap();
    assert!(react.sections.contains(&SectionName::Experience));
    assert!(react.sections.contains(&SectionName::Skills));

    let report = MatchReport::from_analysis(analysis, "sample_resume.txt", engine.extractor().mode(), 30);
    let json = ReportGenerator::with_options(false, true)
        .generate_report(&report, OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["field"], "Frontend Development");
}

#[tokio::test]
async fn test_custom_threshold_from_config() {
    let mut config = Config::default();
    config.ranking.min_score = 99;
    let engine = MatchingEngine::from_config(&config).unwrap();
    let mut manager = InputManager::new().unwrap();

    let resume = manager
        .get_resume_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let analysis = engine.analyze(&resume, "Frontend Development", 1).unwrap();
    assert!(analysis.matches.iter().all(|m| m.score() == 100));
}
