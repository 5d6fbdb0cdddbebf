//! CLI interface for the resume matcher

use crate::config::{Config, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Resume skill-gap analysis and job role recommendations")]
#[command(long_about = "Extract text from a PDF or DOCX resume, report matched and missing skills for a job role, or rank the best-matching job roles by TF-IDF similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report matched and missing skills for one job role
    Analyze {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Job role to compare against
        #[arg(short = 'j', long)]
        role: String,

        /// Job catalog file (CSV, TSV, XLSX); overrides the configured path
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Rank job roles by similarity to the resume
    Recommend {
        /// Path to resume file (PDF, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Number of roles to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Job catalog file (CSV, TSV, XLSX); overrides the configured path
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List the job roles in the catalog
    Roles {
        /// Job catalog file (CSV, TSV, XLSX); overrides the configured path
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "ranking.top_k")
        key: String,

        /// Configuration value
        value: String,
    },
}

impl Commands {
    /// The `--output` value given on the command line, if any.
    pub fn output_flag(&self) -> Option<&str> {
        match self {
            Commands::Analyze { output, .. } | Commands::Recommend { output, .. } => output.as_deref(),
            _ => None,
        }
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Whether failures should be reported as a JSON envelope. The command-line
/// flag wins; without one, the configured format applies when a config loaded.
pub fn wants_json(command: &Commands, config: Option<&Config>) -> bool {
    match command.output_flag() {
        Some(format) => matches!(parse_output_format(format), Ok(OutputFormat::Json)),
        None => config.map_or(false, |c| c.output.format == OutputFormat::Json),
    }
}
