//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub ranking: RankingConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// CSV or spreadsheet holding the job roles
    pub path: PathBuf,
    /// Worksheet to read; the first sheet when unset
    pub sheet: Option<String>,
    pub role_column: String,
    pub skills_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub max_document_bytes: u64,
    /// Upper bound on decompressed DOCX body XML
    #[serde(default = "default_max_inflated_bytes")]
    pub max_inflated_bytes: u64,
    pub timeout_secs: u64,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: Self::default_catalog_path(),
            sheet: None,
            role_column: "Job Role".to_string(),
            skills_column: "Technical Skills Needed".to_string(),
        }
    }
}

impl CatalogConfig {
    fn default_catalog_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("resume-matcher")
            .join("job_roles.csv")
    }
}

fn default_max_inflated_bytes() -> u64 {
    crate::input::text_extractor::DEFAULT_MAX_INFLATED_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            ranking: RankingConfig { top_k: 3 },
            extraction: ExtractionConfig {
                max_document_bytes: 10 * 1024 * 1024,
                max_inflated_bytes: default_max_inflated_bytes(),
                timeout_secs: 30,
                enable_cache: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load the user configuration, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.catalog.role_column.trim().is_empty() || self.catalog.skills_column.trim().is_empty() {
            return Err(ResumeMatcherError::Configuration(
                "catalog column names must not be empty".to_string(),
            ));
        }
        if self.extraction.max_document_bytes == 0 {
            return Err(ResumeMatcherError::Configuration(
                "extraction.max_document_bytes must be greater than zero".to_string(),
            ));
        }
        if self.extraction.max_inflated_bytes == 0 {
            return Err(ResumeMatcherError::Configuration(
                "extraction.max_inflated_bytes must be greater than zero".to_string(),
            ));
        }
        if self.extraction.timeout_secs == 0 {
            return Err(ResumeMatcherError::Configuration(
                "extraction.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Set a value by dotted key, e.g. `ranking.top_k`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "catalog.path" => self.catalog.path = PathBuf::from(value),
            "catalog.sheet" => {
                self.catalog.sheet = if value.is_empty() { None } else { Some(value.to_string()) }
            }
            "catalog.role_column" => self.catalog.role_column = value.to_string(),
            "catalog.skills_column" => self.catalog.skills_column = value.to_string(),
            "ranking.top_k" => self.ranking.top_k = parse_value(key, value)?,
            "extraction.max_document_bytes" => self.extraction.max_document_bytes = parse_value(key, value)?,
            "extraction.max_inflated_bytes" => self.extraction.max_inflated_bytes = parse_value(key, value)?,
            "extraction.timeout_secs" => self.extraction.timeout_secs = parse_value(key, value)?,
            "extraction.enable_cache" => self.extraction.enable_cache = parse_value(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(ResumeMatcherError::Configuration)?
            }
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "output.pretty_json" => self.output.pretty_json = parse_value(key, value)?,
            _ => {
                return Err(ResumeMatcherError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        self.validate()
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        ResumeMatcherError::Configuration(format!("Invalid value '{}' for {}", value, key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ranking.top_k, 3);
        assert_eq!(config.catalog.role_column, "Job Role");
        assert_eq!(config.catalog.skills_column, "Technical Skills Needed");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.ranking.top_k = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ranking.top_k, 5);
        assert_eq!(loaded.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_older_config_without_inflate_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut content = toml::to_string_pretty(&Config::default()).unwrap();
        content = content
            .lines()
            .filter(|line| !line.starts_with("max_inflated_bytes"))
            .collect::<Vec<_>>()
            .join("\n");
        std::fs::write(&path, content).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.extraction.max_inflated_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::default();
        config.set_value("ranking.top_k", "7").unwrap();
        config.set_value("output.format", "json").unwrap();
        config.set_value("catalog.sheet", "Roles").unwrap();

        assert_eq!(config.ranking.top_k, 7);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.catalog.sheet.as_deref(), Some("Roles"));

        assert!(config.set_value("ranking.top_k", "many").is_err());
        assert!(config.set_value("extraction.timeout_secs", "0").is_err());
        assert!(config.set_value("extraction.max_inflated_bytes", "0").is_err());
        assert!(config.set_value("no.such.key", "1").is_err());
    }
}
