//! Job role catalog loaded from tabular data
//!
//! The catalog is built once at startup and shared read-only (`Arc<JobCatalog>`)
//! by the skill matcher and the similarity ranker. It has no mutation API.

use crate::config::CatalogConfig;
use crate::error::{Result, ResumeMatcherError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRole {
    pub id: String,
    pub required_skills_text: String,
}

#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    roles: Vec<JobRole>,
    index: HashMap<String, usize>,
}

impl JobCatalog {
    /// Load the catalog from a CSV/TSV file or a spreadsheet.
    pub fn load(path: &Path, config: &CatalogConfig) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        info!("Loading job catalog from {}", path.display());

        let catalog = match extension.as_str() {
            "csv" => {
                let file = std::fs::File::open(path).map_err(|e| {
                    ResumeMatcherError::CatalogLoad(format!("Cannot open {}: {}", path.display(), e))
                })?;
                Self::from_delimited_reader(file, b',', config)?
            }
            "tsv" => {
                let file = std::fs::File::open(path).map_err(|e| {
                    ResumeMatcherError::CatalogLoad(format!("Cannot open {}: {}", path.display(), e))
                })?;
                Self::from_delimited_reader(file, b'\t', config)?
            }
            "xlsx" | "xlsm" | "xls" | "ods" => Self::from_workbook(path, config)?,
            _ => {
                return Err(ResumeMatcherError::CatalogLoad(format!(
                    "Unsupported catalog file type: {}",
                    path.display()
                )))
            }
        };

        info!("Loaded {} job roles", catalog.len());
        Ok(catalog)
    }

    pub fn from_csv_reader<R: Read>(reader: R, config: &CatalogConfig) -> Result<Self> {
        Self::from_delimited_reader(reader, b',', config)
    }

    /// Build a catalog from `(role, skills)` pairs in source order.
    pub fn from_rows<I, K, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut catalog = Self::default();
        for (role, skills) in rows {
            catalog.insert(role.into(), skills.into());
        }
        catalog
    }

    fn from_delimited_reader<R: Read>(reader: R, delimiter: u8, config: &CatalogConfig) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let (role_idx, skills_idx) = Self::column_indices(&headers, config)?;

        let mut catalog = Self::default();
        for record in rdr.records() {
            let record = record?;
            let role = record.get(role_idx).unwrap_or_default();
            let skills = record.get(skills_idx).unwrap_or_default();
            catalog.push_row(role, skills);
        }
        Ok(catalog)
    }

    fn from_workbook(path: &Path, config: &CatalogConfig) -> Result<Self> {
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            ResumeMatcherError::CatalogLoad(format!("Cannot open workbook {}: {}", path.display(), e))
        })?;

        let range: Range<Data> = match &config.sheet {
            Some(sheet) => workbook.worksheet_range(sheet).map_err(|e| {
                ResumeMatcherError::CatalogLoad(format!("Cannot read sheet '{}': {}", sheet, e))
            })?,
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| ResumeMatcherError::CatalogLoad(format!("{} has no worksheets", path.display())))?
                .map_err(|e| ResumeMatcherError::CatalogLoad(format!("Cannot read first sheet: {}", e)))?,
        };

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| ResumeMatcherError::CatalogLoad("Worksheet is empty".to_string()))?
            .iter()
            .map(|cell| cell.to_string())
            .collect();
        let (role_idx, skills_idx) = Self::column_indices(&headers, config)?;

        let mut catalog = Self::default();
        for row in rows {
            let role = row.get(role_idx).map(|c| c.to_string()).unwrap_or_default();
            let skills = row.get(skills_idx).map(|c| c.to_string()).unwrap_or_default();
            catalog.push_row(&role, &skills);
        }
        Ok(catalog)
    }

    /// Locate the role and skills columns after trimming header whitespace.
    fn column_indices(headers: &[String], config: &CatalogConfig) -> Result<(usize, usize)> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name.trim())
                .ok_or_else(|| ResumeMatcherError::CatalogLoad(format!(
                    "Missing required column '{}' (found: {})",
                    name,
                    headers.iter().map(|h| h.trim()).collect::<Vec<_>>().join(", ")
                )))
        };
        Ok((find(config.role_column.as_str())?, find(config.skills_column.as_str())?))
    }

    fn push_row(&mut self, role: &str, skills: &str) {
        if role.trim().is_empty() {
            debug!("Skipping catalog row with empty job role");
            return;
        }
        self.insert(role.to_string(), skills.to_string());
    }

    /// Later rows overwrite earlier ones; the role keeps its first position.
    fn insert(&mut self, id: String, required_skills_text: String) {
        match self.index.get(&id) {
            Some(&pos) => {
                warn!("Duplicate job role '{}' in catalog; later row overrides earlier one", id);
                self.roles[pos].required_skills_text = required_skills_text;
            }
            None => {
                self.index.insert(id.clone(), self.roles.len());
                self.roles.push(JobRole { id, required_skills_text });
            }
        }
    }

    pub fn lookup(&self, job_role_id: &str) -> Option<&str> {
        self.index
            .get(job_role_id)
            .map(|&pos| self.roles[pos].required_skills_text.as_str())
    }

    pub fn all_roles(&self) -> &[JobRole] {
        &self.roles
    }

    pub fn role_ids(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
