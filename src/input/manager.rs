//! Input manager for reading resume files from disk

use crate::config::ExtractionConfig;
use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_document_bytes: u64,
    max_inflated_bytes: u64,
    timeout: Duration,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self::from_config(&crate::config::Config::default().extraction)
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: config.enable_cache,
            max_document_bytes: config.max_document_bytes,
            max_inflated_bytes: config.max_inflated_bytes,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_document_bytes(mut self, max: u64) -> Self {
        self.max_document_bytes = max;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn extract_file(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let format = DocumentFormat::from_path(path)?;

        let size = fs::metadata(path).await?.len();
        if size > self.max_document_bytes {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "{} is {} bytes, larger than the {} byte limit",
                path.display(),
                size,
                self.max_document_bytes
            )));
        }

        let bytes = fs::read(path).await?;
        info!("Extracting text from {}: {}", format, path.display());
        let text = self.extract_bytes(bytes, format).await?;
        debug!("Extracted {} characters from {}", text.chars().count(), path.display());

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Run extraction on the blocking pool, bounded by the configured timeout.
    pub async fn extract_bytes(&self, bytes: Vec<u8>, format: DocumentFormat) -> Result<String> {
        if bytes.len() as u64 > self.max_document_bytes {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "document is {} bytes, larger than the {} byte limit",
                bytes.len(),
                self.max_document_bytes
            )));
        }

        let max_inflated_bytes = self.max_inflated_bytes;
        self.run_bounded(format, move || {
            text_extractor::extract_with_limit(&bytes, format, max_inflated_bytes)
        })
        .await
    }

    async fn run_bounded<F>(&self, format: DocumentFormat, job: F) -> Result<String>
    where
        F: FnOnce() -> Result<String> + Send + 'static,
    {
        let task = tokio::task::spawn_blocking(job);

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ResumeMatcherError::CorruptDocument(format!(
                "{} extraction aborted: {}",
                format, join_error
            ))),
            Err(_) => {
                warn!("{} extraction exceeded {:?}", format, self.timeout);
                Err(ResumeMatcherError::ExtractionTimeout(self.timeout.as_secs()))
            }
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
