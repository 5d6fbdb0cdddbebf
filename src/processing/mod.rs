//! Skill matching and similarity ranking

pub mod text_processor;
pub mod skills;
pub mod tfidf;
pub mod skill_matcher;
pub mod ranker;
pub mod analyzer;

pub use analyzer::{AnalysisEngine, AnalysisOutcome};
pub use ranker::{RankedRecommendationList, Recommendation, SimilarityRanker};
pub use skill_matcher::{MatchResult, SkillSetMatcher};
pub use skills::SkillSet;
