//! Analysis engine: routes a resume to skill-gap matching or role ranking

use crate::catalog::JobCatalog;
use crate::error::Result;
use crate::processing::ranker::{RankedRecommendationList, SimilarityRanker, DEFAULT_TOP_K};
use crate::processing::skill_matcher::{MatchResult, SkillSetMatcher};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    SkillGap(MatchResult),
    Recommendations { recommendations: RankedRecommendationList },
}

/// Shared, read-only entry point for request handlers.
///
/// Cheap to share behind an `Arc`: every call computes an independent result.
pub struct AnalysisEngine {
    catalog: Arc<JobCatalog>,
    matcher: SkillSetMatcher,
    ranker: SimilarityRanker,
    top_k: usize,
}

impl AnalysisEngine {
    pub fn new(catalog: Arc<JobCatalog>) -> Self {
        Self {
            matcher: SkillSetMatcher::new(Arc::clone(&catalog)),
            ranker: SimilarityRanker::new(Arc::clone(&catalog)),
            catalog,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Skill gap for `job_role` when given, otherwise top-k recommendations.
    pub fn analyze(&self, resume_text: &str, job_role: Option<&str>) -> Result<AnalysisOutcome> {
        match job_role {
            Some(role) => {
                info!("Analyzing skill gap for '{}'", role);
                Ok(AnalysisOutcome::SkillGap(self.match_skills(resume_text, role)?))
            }
            None => {
                info!("Ranking {} job roles", self.catalog.len());
                Ok(AnalysisOutcome::Recommendations {
                    recommendations: self.recommend(resume_text),
                })
            }
        }
    }

    pub fn match_skills(&self, resume_text: &str, job_role: &str) -> Result<MatchResult> {
        self.matcher.match_skills(resume_text, job_role)
    }

    pub fn recommend(&self, resume_text: &str) -> RankedRecommendationList {
        self.ranker.rank(resume_text, self.top_k)
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}
