//! Output formatters for console and JSON

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::{AnalysisReport, ErrorReport};
use crate::processing::{AnalysisOutcome, MatchResult, RankedRecommendationList};
use colored::{Color, Colorize};

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n{} {}\n", "█", title)
        }
    }

    fn format_bar(&self, fraction: f64, color: Color) -> String {
        const WIDTH: usize = 20;
        let filled = (fraction.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled));
        self.colorize(&bar, color)
    }

    fn format_skill_gap(&self, result: &MatchResult) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("SKILL MATCH ANALYSIS: {}", result.job_role)));
        output.push_str(&format!(
            "Coverage: {} {:.1}% ({} of {} required skills)\n",
            self.format_bar(result.coverage(), Color::Green),
            result.coverage() * 100.0,
            result.matched_count(),
            result.matched_count() + result.missing_count()
        ));

        output.push_str(&format!("\n{} ({})\n", self.colorize("Matched skills", Color::Green), result.matched_count()));
        if result.matched_skills.is_empty() {
            output.push_str("  (none)\n");
        }
        for skill in result.matched_skills.iter() {
            output.push_str(&format!("  {} {}\n", self.colorize("✓", Color::Green), skill));
        }

        output.push_str(&format!("\n{} ({})\n", self.colorize("Missing skills", Color::Red), result.missing_count()));
        if result.missing_skills.is_empty() {
            output.push_str("  (none)\n");
        }
        for skill in result.missing_skills.iter() {
            output.push_str(&format!("  {} {}\n", self.colorize("✗", Color::Red), skill));
        }

        output
    }

    fn format_recommendations(&self, recommendations: &RankedRecommendationList) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("TOP JOB ROLE RECOMMENDATIONS"));
        if recommendations.is_empty() {
            output.push_str("No job roles available.\n");
            return output;
        }

        let colors = [Color::Blue, Color::Green, Color::Yellow];
        for (i, rec) in recommendations.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {:<30} {} {:>5.1}%\n",
                i + 1,
                rec.job_title,
                self.format_bar(rec.similarity_score, colors[i % colors.len()]),
                rec.percentage()
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = match &report.outcome {
            AnalysisOutcome::SkillGap(result) => self.format_skill_gap(result),
            AnalysisOutcome::Recommendations { recommendations } => self.format_recommendations(recommendations),
        };

        output.push_str(&format!(
            "\nResume: {} | Roles in catalog: {} | Processing time: {}ms\n",
            report.resume, report.catalog_size, report.processing_time_ms
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

    pub fn format_error(&self, error: &ErrorReport) -> Result<String> {
        let wrapped = serde_json::json!({ "error": error });
        if self.pretty {
            Ok(serde_json::to_string_pretty(&wrapped)?)
        } else {
            Ok(serde_json::to_string(&wrapped)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
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

/// Pick the formatter for the requested output format.
pub fn formatter_for(format: OutputFormat, config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(config.color_output)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.pretty_json)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::JobCatalog;
    use crate::processing::AnalysisEngine;
    use std::sync::Arc;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(Arc::new(JobCatalog::from_rows(vec![
            ("Data Analyst", "sql, excel, python"),
            ("Web Developer", "html, css, javascript"),
        ])))
    }

    #[test]
    fn test_console_skill_gap() {
        let outcome = engine().analyze("SQL and Python", Some("Data Analyst")).unwrap();
        let report = AnalysisReport::new("resume.pdf", 2, 5, outcome);

        let text = ConsoleFormatter::new(false).format_report(&report).unwrap();
        assert!(text.contains("SKILL MATCH ANALYSIS: Data Analyst"));
        assert!(text.contains("✓ python"));
        assert!(text.contains("✗ excel"));
        assert!(text.contains("66.7%"));
    }

    #[test]
    fn test_console_recommendations() {
        let outcome = engine().analyze("html css", None).unwrap();
        let report = AnalysisReport::new("resume.docx", 2, 3, outcome);

        let text = ConsoleFormatter::new(false).format_report(&report).unwrap();
        assert!(text.contains("1. Web Developer"));
        assert!(text.contains("2. Data Analyst"));
    }

    #[test]
    fn test_json_report() {
        let outcome = engine().analyze("html css", None).unwrap();
        let report = AnalysisReport::new("resume.docx", 2, 3, outcome);

        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "recommendations");
        assert_eq!(value["recommendations"][0]["job_title"], "Web Developer");
        assert_eq!(value["resume"], "resume.docx");
    }

    #[test]
    fn test_formatter_selection() {
        let config = crate::config::Config::default().output;
        assert_eq!(formatter_for(OutputFormat::Json, &config).supports_format(), OutputFormat::Json);
        assert_eq!(formatter_for(OutputFormat::Console, &config).supports_format(), OutputFormat::Console);
    }

    #[test]
    fn test_json_error() {
        let err = crate::error::ResumeMatcherError::UnsupportedFormat("txt".to_string());
        let json = JsonFormatter::new(false).format_error(&ErrorReport::from(&err)).unwrap();
        assert!(json.contains("\"kind\":\"unsupported_format\""));
    }
}
