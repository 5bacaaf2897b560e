//! Placement matcher: rank companies by how well a resume covers their postings

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use placement_matcher::cli::{self, Cli, Commands, ConfigAction};
use placement_matcher::config::{Config, OutputFormat};
use placement_matcher::error::{PlacementError, Result};
use placement_matcher::input::InputManager;
use placement_matcher::matching::taxonomy::SELECTABLE_FIELDS;
use placement_matcher::matching::{AnalysisSession, MatchingEngine};
use placement_matcher::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use placement_matcher::output::report::MatchReport;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            field,
            output,
            save,
            detailed,
            min_score,
            no_related,
        } => {
            let mut config = config;
            if let Some(min_score) = min_score {
                config.ranking.min_score = min_score;
            }
            if no_related {
                config.matching.include_related_fields = false;
            }
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(PlacementError::InvalidInput)?,
                None => config.output.format,
            };
            let field = field.unwrap_or_else(|| config.matching.selected_field.clone());
            run_match(&config, &resume, &field, output_format, save, detailed || config.output.detailed).await
        }

        Commands::Fields => {
            let engine = MatchingEngine::from_config(&config)?;
            println!("Selectable fields:");
            for name in SELECTABLE_FIELDS {
                let companies = engine.catalog().jobs_for_field(name).len();
                match engine.taxonomy().field(name) {
                    Some(field) => println!(
                        "  • {} ({} skills, {} companies)",
                        name,
                        field.skill_count(),
                        companies
                    ),
                    None => println!(
                        "  • {} (uses the {} taxonomy, {} companies)",
                        name, config.matching.default_field, companies
                    ),
                }
            }
            Ok(())
        }

        Commands::Companies { field } => {
            let engine = MatchingEngine::from_config(&config)?;
            let jobs = match &field {
                Some(field) => engine.catalog().jobs_for_field(field),
                None => engine.catalog().jobs.clone(),
            };
            if jobs.is_empty() {
                println!("No companies found");
            }
            for job in &jobs {
                println!("{} ({})", job.company_name, job.company_id);
                println!("  {} | {} | {}", job.position, job.location, job.salary_range);
                println!("  Fields: {}", job.fields.join(", "));
                let requirements: Vec<String> = job
                    .requirements
                    .iter()
                    .map(|r| format!("{} ({:.0}%)", r.skill, r.weight * 100.0))
                    .collect();
                println!("  Requires: {}", requirements.join(", "));
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| PlacementError::Configuration(e.to_string()))?;
                println!("# {}", config_path.display());
                println!("{}", content);
                Ok(())
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults at {}", config_path.display());
                Ok(())
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
                Ok(())
            }
        },
    }
}

async fn run_match(
    config: &Config,
    resume: &Path,
    field: &str,
    output_format: OutputFormat,
    save: Option<PathBuf>,
    detailed: bool,
) -> Result<()> {
    cli::validate_file_extension(resume, &["pdf", "txt", "md"])
        .map_err(|e| PlacementError::UnsupportedFormat(format!("Resume file: {}", e)))?;

    let engine = MatchingEngine::from_config(config)?;
    let mut input_manager = InputManager::from_config(&config.input)?;
    let mut session = AnalysisSession::new();

    info!("Starting placement match for field: {}", field);
    let ticket = session.begin();

    let spinner = extraction_spinner(resume);
    let resume_text = match input_manager.get_resume_text(resume).await {
        Ok(text) => {
            spinner.finish_and_clear();
            text
        }
        Err(e) => {
            spinner.abandon_with_message("Extraction failed");
            session.fail(ticket);
            return Err(e);
        }
    };

    if !engine.analyze_in_session(&mut session, ticket, &resume_text, field)? {
        warn!("Analysis was superseded before it finished");
        return Ok(());
    }
    let Some(analysis) = session.current() else {
        return Ok(());
    };

    let report = MatchReport::from_analysis(
        analysis,
        &resume.display().to_string(),
        engine.extractor().mode(),
        engine.ranking().min_score,
    );
    let use_colors = config.output.color_output && save.is_none();
    let generator = ReportGenerator::with_options(use_colors, detailed);
    let rendered = generator.generate_report(&report, output_format)?;

    match save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(output_format, &resume.to_string_lossy(), true))
            } else {
                path
            };
            save_report_to_file(&rendered, &path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn extraction_spinner(resume: &Path) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Extracting text from {}", resume.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
