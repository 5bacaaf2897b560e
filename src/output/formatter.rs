//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::{PlacementError, Result};
use crate::output::report::*;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Placement Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 6px 14px; border-radius: 20px; font-weight: bold; color: white; }
        .score-strong { background: #28a745; }
        .score-partial { background: #ffc107; color: #000; }
        .score-none { background: #dc3545; }
        .company { border: 1px solid #e9ecef; border-radius: 6px; padding: 15px; margin: 15px 0; }
        .chip { display: inline-block; padding: 2px 10px; margin: 2px; border-radius: 12px; font-size: 0.9em; }
        .chip-matched { background: #d4edda; color: #155724; }
        .chip-missing { border: 1px solid #dc3545; color: #dc3545; }
        .metadata { margin-top: 30px; font-size: 0.85em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Placement Match Report</h1>
            <p>Field: <strong>{{ field }}</strong>{% if field != requested_field %} (requested: {{ requested_field }}){% endif %}</p>
            <p>Overall Match Score: <span class="score-badge {{ score_class }}">{{ overall_score }}%</span></p>
            <p>{{ verdict }}</p>
        </div>

        <div class="section">
            <h2>Detected Skills ({{ skills.len() }})</h2>
            {% for skill in skills %}<span class="chip chip-matched">{{ skill }}</span>{% endfor %}
        </div>

        {% if !strength_areas.is_empty() %}
        <div class="section">
            <h3>Strength Areas</h3>
            <ul>{% for area in strength_areas %}<li>{{ area }}</li>{% endfor %}</ul>
        </div>
        {% endif %}

        {% if !improvement_areas.is_empty() %}
        <div class="section">
            <h3>Improvement Areas</h3>
            <ul>{% for area in improvement_areas %}<li>{{ area }}</li>{% endfor %}</ul>
        </div>
        {% endif %}

        <div class="section">
            <h2>Matched Companies</h2>
            {% if companies.is_empty() %}
            <p>No company scored above {{ min_score }}%.</p>
            {% endif %}
            {% for company in companies %}
            <div class="company">
                <h3>{{ company.rank }}. {{ company.company_name }} &middot; {{ company.position }}</h3>
                <p>{{ company.location }}{% if !company.salary_range.is_empty() %} | {{ company.salary_range }}{% endif %}</p>
                <p>Match Score: <span class="score-badge {{ company.score_class }}">{{ company.score }}%</span></p>
                <p>
                {% for skill in company.matched_skills %}<span class="chip chip-matched">{{ skill }}</span>{% endfor %}
                {% for skill in company.missing_skills %}<span class="chip chip-missing">{{ skill }}</span>{% endfor %}
                </p>
                {% if !company.tailoring_tips.is_empty() %}
                <ul>{% for tip in company.tailoring_tips %}<li>{{ tip }}</li>{% endfor %}</ul>
                {% endif %}
            </div>
            {% endfor %}
        </div>

        <div class="metadata">
            <p>Generated by Placement Matcher v{{ version }} on {{ generated_at }}</p>
            <p>Resume: {{ resume_file }} | Processing time: {{ processing_time }}ms</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    field: String,
    requested_field: String,
    overall_score: u8,
    score_class: &'static str,
    verdict: String,
    skills: Vec<String>,
    strength_areas: Vec<String>,
    improvement_areas: Vec<String>,
    companies: Vec<HtmlCompany>,
    min_score: u8,
    version: String,
    generated_at: String,
    resume_file: String,
    processing_time: u64,
}

struct HtmlCompany {
    rank: usize,
    company_name: String,
    position: String,
    location: String,
    salary_range: String,
    score: u8,
    score_class: &'static str,
    matched_skills: Vec<String>,
    missing_skills: Vec<String>,
    tailoring_tips: Vec<String>,
}

fn format_timestamp(report: &MatchReport) -> String {
    chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn html_score_class(score: u8) -> &'static str {
    if score == 0 {
        return "score-none";
    }
    match MatchStrength::from_score(score) {
        MatchStrength::Strong => "score-strong",
        MatchStrength::Moderate => "score-partial",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score(&self, score: u8) -> String {
        let color = match MatchStrength::from_score(score) {
            MatchStrength::Strong => Color::Green,
            MatchStrength::Moderate if score > 0 => Color::Yellow,
            MatchStrength::Moderate => Color::Red,
        };
        if self.use_colors {
            format!("{}%", score).color(color).bold().to_string()
        } else {
            format!("{}%", score)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str(&self.format_header("PLACEMENT MATCH REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            format_timestamp(report),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!("Field: {}", self.colorize(&summary.field, Color::Cyan)));
        if summary.field != summary.requested_field {
            output.push_str(&format!(" (requested: {})", summary.requested_field));
        }
        output.push('\n');
        output.push_str(&format!("Overall Match Score: {}\n", self.format_score(summary.overall_score)));
        output.push_str(&format!("Verdict: {}\n", summary.verdict));

        output.push_str(&self.format_header(&format!("Detected Skills ({})", summary.skills_detected), 2));
        if report.skills.is_empty() {
            output.push_str("  none\n");
        } else {
            let names: Vec<&str> = report.skills.iter().map(|s| s.skill.as_str()).collect();
            output.push_str(&format!("  {}\n", self.colorize(&names.join(", "), Color::Green)));
        }

        if !summary.strength_areas.is_empty() {
            output.push_str(&self.format_header("Strength Areas", 3));
            for area in &summary.strength_areas {
                output.push_str(&format!("  • {}\n", self.colorize(area, Color::Green)));
            }
        }
        if !summary.improvement_areas.is_empty() {
            output.push_str(&self.format_header("Improvement Areas", 3));
            for area in &summary.improvement_areas {
                output.push_str(&format!("  • {}\n", self.colorize(area, Color::Yellow)));
            }
        }

        output.push_str(&self.format_header(&format!("Matched Companies ({})", summary.companies_matched), 2));
        if report.companies.is_empty() {
            output.push_str(&format!(
                "  No company scored above {}%.\n",
                report.metadata.min_score
            ));
        }
        for company in &report.companies {
            output.push_str(&format!(
                "{}. {} - {} {}\n",
                company.rank,
                self.colorize(&company.company_name, Color::White),
                company.position,
                self.format_score(company.score)
            ));
            output.push_str(&format!(
                "   {} | {}\n",
                company.location,
                self.colorize(&company.strength.to_string(), Color::BrightBlack)
            ));
            if !company.matched_skills.is_empty() {
                output.push_str(&format!(
                    "   Matched: {}\n",
                    self.colorize(&company.matched_skills.join(", "), Color::Green)
                ));
            }
            if !company.missing_skills.is_empty() {
                output.push_str(&format!(
                    "   Missing: {}\n",
                    self.colorize(&company.missing_skills.join(", "), Color::Red)
                ));
            }
            if self.detailed {
                if !company.salary_range.is_empty() {
                    output.push_str(&format!("   Salary: {}\n", company.salary_range));
                }
                for tip in &company.tailoring_tips {
                    output.push_str(&format!("   → {}\n", tip));
                }
            }
            output.push('\n');
        }

        if self.detailed {
            output.push_str(&self.format_header("Skill Evidence", 2));
            for row in &report.skills {
                let sections: Vec<String> = row.sections.iter().map(|s| s.to_string()).collect();
                output.push_str(&format!(
                    "  {} (matched \"{}\"{}{})\n",
                    row.skill,
                    row.matched_synonym,
                    if sections.is_empty() { "" } else { " in " },
                    sections.join(", ")
                ));
            }
        }

        output.push_str(&format!(
            "\nGenerated by Placement Matcher v{}\n",
            report.metadata.matcher_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_badge(score: u8) -> &'static str {
        match MatchStrength::from_score(score) {
            MatchStrength::Strong => "🟢",
            MatchStrength::Moderate if score > 0 => "🟡",
            MatchStrength::Moderate => "🔴",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str("# Placement Match Report\n\n");

        if self.include_metadata {
            let resume_name = Path::new(&report.metadata.resume_file)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| report.metadata.resume_file.clone());
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                format_timestamp(report),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!("**Resume:** `{}`\n\n", resume_name));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("**Field:** {}", summary.field));
        if summary.field != summary.requested_field {
            output.push_str(&format!(" (requested: {})", summary.requested_field));
        }
        output.push_str("\n\n");
        output.push_str(&format!(
            "**Overall Match Score:** {}% {}\n\n",
            summary.overall_score,
            Self::markdown_badge(summary.overall_score)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", summary.verdict));

        output.push_str(&format!("### Detected Skills ({})\n\n", summary.skills_detected));
        for row in &report.skills {
            output.push_str(&format!("- {}\n", row.skill));
        }
        output.push('\n');

        if !summary.improvement_areas.is_empty() {
            output.push_str("### Areas for Improvement\n\n");
            for area in &summary.improvement_areas {
                output.push_str(&format!("- {}\n", area));
            }
            output.push('\n');
        }

        output.push_str("## Matched Companies\n\n");
        if report.companies.is_empty() {
            output.push_str(&format!("No company scored above {}%.\n\n", report.metadata.min_score));
        } else {
            output.push_str("| # | Company | Position | Score | Missing |\n");
            output.push_str("|---|---------|----------|-------|---------|\n");
            for company in &report.companies {
                output.push_str(&format!(
                    "| {} | {} | {} | {}% {} | {} |\n",
                    company.rank,
                    company.company_name,
                    company.position,
                    company.score,
                    Self::markdown_badge(company.score),
                    company.missing_skills.join(", ")
                ));
            }
            output.push('\n');

            for company in report.companies.iter().filter(|c| !c.tailoring_tips.is_empty()) {
                output.push_str(&format!("### Tailoring for {}\n\n", company.company_name));
                for tip in &company.tailoring_tips {
                    output.push_str(&format!("- {}\n", tip));
                }
                output.push('\n');
            }
        }

        output.push_str("---\n\n");
        output.push_str(&format!(
            "*Generated by Placement Matcher v{}*\n",
            report.metadata.matcher_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &MatchReport) -> HtmlTemplate {
        HtmlTemplate {
            include_styles: self.include_styles,
            field: report.summary.field.clone(),
            requested_field: report.summary.requested_field.clone(),
            overall_score: report.summary.overall_score,
            score_class: html_score_class(report.summary.overall_score),
            verdict: report.summary.verdict.clone(),
            skills: report.skills.iter().map(|s| s.skill.clone()).collect(),
            strength_areas: report.summary.strength_areas.clone(),
            improvement_areas: report.summary.improvement_areas.clone(),
            companies: report
                .companies
                .iter()
                .map(|c| HtmlCompany {
                    rank: c.rank,
                    company_name: c.company_name.clone(),
                    position: c.position.clone(),
                    location: c.location.clone(),
                    salary_range: c.salary_range.clone(),
                    score: c.score,
                    score_class: html_score_class(c.score),
                    matched_skills: c.matched_skills.clone(),
                    missing_skills: c.missing_skills.clone(),
                    tailoring_tips: c.tailoring_tips.clone(),
                })
                .collect(),
            min_score: report.metadata.min_score,
            version: report.metadata.matcher_version.clone(),
            generated_at: format_timestamp(report),
            resume_file: report.metadata.resume_file.clone(),
            processing_time: report.metadata.processing_time_ms,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| PlacementError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &MatchReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_matches{}.{}", base_name, timestamp_suffix, extension)
}
