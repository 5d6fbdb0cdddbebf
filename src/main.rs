//! Resume matcher: skill-gap analysis and job role recommendations

use clap::Parser;
use log::{debug, error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::Config;
use resume_matcher::output::{formatter_for, AnalysisReport, ErrorReport, JsonFormatter};
use resume_matcher::processing::AnalysisEngine;
use resume_matcher::{InputManager, JobCatalog, Result, ResumeMatcherError};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            if cli::wants_json(&cli.command, None) {
                print_json_error(&e, true);
            }
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let json_errors = cli::wants_json(&cli.command, Some(&config));
    let pretty = config.output.pretty_json;

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        if json_errors {
            print_json_error(&e, pretty);
        }
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn print_json_error(e: &ResumeMatcherError, pretty: bool) {
    if let Ok(json) = JsonFormatter::new(pretty).format_error(&ErrorReport::from(e)) {
        println!("{}", json);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if path.exists() => Config::load_from(path),
        Some(path) => {
            warn!("Config file {} not found, using defaults", path.display());
            Ok(Config::default())
        }
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze { resume, role, catalog, output, save } => {
            let started = Instant::now();
            let engine = build_engine(&config, catalog.as_deref(), None)?;
            let resume_text = extract_resume(&config, &resume).await?;

            let outcome = engine.analyze(&resume_text, Some(&role))?;
            let report = AnalysisReport::new(
                display_name(&resume),
                engine.catalog().len(),
                started.elapsed().as_millis() as u64,
                outcome,
            );
            emit(&config, output.as_deref(), save.as_deref(), &report)
        }

        Commands::Recommend { resume, top_k, catalog, output, save } => {
            let started = Instant::now();
            let engine = build_engine(&config, catalog.as_deref(), top_k)?;
            let resume_text = extract_resume(&config, &resume).await?;

            let outcome = engine.analyze(&resume_text, None)?;
            let report = AnalysisReport::new(
                display_name(&resume),
                engine.catalog().len(),
                started.elapsed().as_millis() as u64,
                outcome,
            );
            emit(&config, output.as_deref(), save.as_deref(), &report)
        }

        Commands::Roles { catalog } => {
            let catalog = load_catalog(&config, catalog.as_deref())?;
            println!("Job roles ({}):", catalog.len());
            for role in catalog.all_roles() {
                println!("  • {}", role.id);
            }
            Ok(())
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("{}", content);
                }
                ConfigAction::Path => println!("{}", path.display()),
                ConfigAction::Reset => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults: {}", path.display());
                }
                ConfigAction::Set { key, value } => {
                    let mut config = config;
                    config.set_value(&key, &value)?;
                    config.save_to(&path)?;
                    println!("Set {} = {}", key, value);
                }
            }
            Ok(())
        }
    }
}

fn load_catalog(config: &Config, override_path: Option<&Path>) -> Result<JobCatalog> {
    let path = override_path.unwrap_or(config.catalog.path.as_path());
    JobCatalog::load(path, &config.catalog)
}

fn build_engine(config: &Config, catalog_path: Option<&Path>, top_k: Option<usize>) -> Result<AnalysisEngine> {
    let catalog = Arc::new(load_catalog(config, catalog_path)?);
    let top_k = top_k.unwrap_or(config.ranking.top_k);
    let engine = AnalysisEngine::new(catalog).with_top_k(top_k);
    debug!("Built analysis engine with top_k = {}", engine.top_k());
    Ok(engine)
}

async fn extract_resume(config: &Config, path: &Path) -> Result<String> {
    let mut input_manager = InputManager::from_config(&config.extraction);
    let text = input_manager.extract_file(path).await?;
    info!("Resume text length: {} characters", text.chars().count());
    Ok(text)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn emit(config: &Config, output: Option<&str>, save: Option<&Path>, report: &AnalysisReport) -> Result<()> {
    let format = match output {
        Some(format) => cli::parse_output_format(format).map_err(ResumeMatcherError::InvalidInput)?,
        None => config.output.format,
    };

    let mut output_config = config.output.clone();
    if save.is_some() {
        output_config.color_output = false;
    }

    let rendered = formatter_for(format, &output_config).format_report(report)?;

    match save {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
