//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Document could not be read: {0}")]
    CorruptDocument(String),

    #[error("Job role '{0}' not found")]
    JobRoleNotFound(String),

    #[error("Failed to load job catalog: {0}")]
    CatalogLoad(String),

    #[error("Text extraction timed out after {0}s")]
    ExtractionTimeout(u64),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ResumeMatcherError {
    /// Stable machine-readable identifier for the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ResumeMatcherError::Io(_) => "io",
            ResumeMatcherError::UnsupportedFormat(_) => "unsupported_format",
            ResumeMatcherError::CorruptDocument(_) => "corrupt_document",
            ResumeMatcherError::JobRoleNotFound(_) => "job_role_not_found",
            ResumeMatcherError::CatalogLoad(_) => "catalog_load",
            ResumeMatcherError::ExtractionTimeout(_) => "extraction_timeout",
            ResumeMatcherError::Configuration(_) => "configuration",
            ResumeMatcherError::Serialization(_) => "serialization",
            ResumeMatcherError::InvalidInput(_) => "invalid_input",
        }
    }
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

/// Convert CSV reader errors to our custom error type
impl From<csv::Error> for ResumeMatcherError {
    fn from(err: csv::Error) -> Self {
        ResumeMatcherError::CatalogLoad(err.to_string())
    }
}
