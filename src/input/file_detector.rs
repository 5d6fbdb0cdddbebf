//! Document format detection

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Parse a declared format tag such as `"pdf"`, `"DOCX"` or `".pdf"`.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let normalized = tag.trim().trim_start_matches('.').to_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ResumeMatcherError::UnsupportedFormat(format!(
                "'{}' (expected PDF or DOCX)",
                tag
            ))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeMatcherError::UnsupportedFormat(
                format!("File has no extension: {}", path.display())
            ))?;

        Self::from_tag(extension)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::Docx => write!(f, "DOCX"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(DocumentFormat::from_tag("PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_tag(".docx").unwrap(), DocumentFormat::Docx);
        assert!(matches!(
            DocumentFormat::from_tag("TXT"),
            Err(ResumeMatcherError::UnsupportedFormat(_))
        ));
        assert!(DocumentFormat::from_tag("doc").is_err());
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("cv/Jane Doe.Pdf")).unwrap(),
            DocumentFormat::Pdf
        );
        assert!(DocumentFormat::from_path(Path::new("resume")).is_err());
        assert!(DocumentFormat::from_path(Path::new("resume.md")).is_err());
    }
}
