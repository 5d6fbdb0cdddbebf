//! Report envelope handed to formatters

use crate::processing::AnalysisOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub resume: String,
    pub processing_time_ms: u64,
    pub catalog_size: usize,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

impl AnalysisReport {
    pub fn new(resume: impl Into<String>, catalog_size: usize, processing_time_ms: u64, outcome: AnalysisOutcome) -> Self {
        Self {
            generated_at: Utc::now(),
            resume: resume.into(),
            processing_time_ms,
            catalog_size,
            outcome,
        }
    }
}

/// Structured failure emitted in JSON mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
}

impl From<&crate::error::ResumeMatcherError> for ErrorReport {
    fn from(err: &crate::error::ResumeMatcherError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}
