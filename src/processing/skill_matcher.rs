//! Skill gap matching between a resume and a single job role

use crate::catalog::JobCatalog;
use crate::error::{Result, ResumeMatcherError};
use crate::processing::skills::SkillSet;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_role: String,
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
}

impl MatchResult {
    pub fn matched_count(&self) -> usize {
        self.matched_skills.len()
    }

    pub fn missing_count(&self) -> usize {
        self.missing_skills.len()
    }

    /// Share of required skills found in the resume, 0.0 when none are listed.
    pub fn coverage(&self) -> f64 {
        let required = self.matched_count() + self.missing_count();
        if required == 0 {
            0.0
        } else {
            self.matched_count() as f64 / required as f64
        }
    }
}

/// Compares required skill phrases of a role against resume word tokens.
///
/// Resume skills are single words, so a multi-word requirement such as
/// "machine learning" is always reported missing.
pub struct SkillSetMatcher {
    catalog: Arc<JobCatalog>,
    processor: TextProcessor,
}

impl SkillSetMatcher {
    pub fn new(catalog: Arc<JobCatalog>) -> Self {
        Self {
            catalog,
            processor: TextProcessor::new(),
        }
    }

    pub fn match_skills(&self, resume_text: &str, job_role_id: &str) -> Result<MatchResult> {
        let required = self
            .catalog
            .lookup(job_role_id)
            .ok_or_else(|| ResumeMatcherError::JobRoleNotFound(job_role_id.to_string()))?;

        let job_skills = self.processor.skill_phrases(required);
        let resume_skills = self.processor.skill_tokens(resume_text);

        let matched_skills = job_skills.intersection(&resume_skills);
        let missing_skills = job_skills.difference(&resume_skills);

        debug!(
            "{}: {} of {} required skills matched",
            job_role_id,
            matched_skills.len(),
            job_skills.len()
        );

        Ok(MatchResult {
            job_role: job_role_id.to_string(),
            matched_skills,
            missing_skills,
        })
    }
}
