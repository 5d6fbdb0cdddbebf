//! Resume matcher library

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use catalog::{JobCatalog, JobRole};
pub use config::Config;
pub use error::{Result, ResumeMatcherError};
pub use input::{DocumentFormat, InputManager};
pub use processing::{AnalysisEngine, MatchResult, RankedRecommendationList, Recommendation};
