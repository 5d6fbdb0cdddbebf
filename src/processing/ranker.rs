//! Job role recommendations by TF-IDF cosine similarity

use crate::catalog::JobCatalog;
use crate::processing::tfidf::TfidfVectorizer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub job_title: String,
    pub similarity_score: f64,
}

impl Recommendation {
    pub fn percentage(&self) -> f64 {
        self.similarity_score * 100.0
    }
}

/// Recommendations sorted by descending score, at most `top_k` long.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedRecommendationList(Vec<Recommendation>);

impl RankedRecommendationList {
    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Recommendation> {
        self.0.first()
    }

    pub fn into_vec(self) -> Vec<Recommendation> {
        self.0
    }
}

impl<'a> IntoIterator for &'a RankedRecommendationList {
    type Item = &'a Recommendation;
    type IntoIter = std::slice::Iter<'a, Recommendation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Scores every catalog role against a resume.
///
/// Each role is compared in its own two-document TF-IDF space
/// (`[resume, role skills]`), so vocabulary and IDF weights are local to
/// the pair. Scores therefore differ from a catalog-wide vocabulary.
pub struct SimilarityRanker {
    catalog: Arc<JobCatalog>,
    vectorizer: TfidfVectorizer,
}

impl SimilarityRanker {
    pub fn new(catalog: Arc<JobCatalog>) -> Self {
        Self {
            catalog,
            vectorizer: TfidfVectorizer::new(),
        }
    }

    pub fn rank(&self, resume_text: &str, top_k: usize) -> RankedRecommendationList {
        if self.catalog.is_empty() {
            return RankedRecommendationList::default();
        }

        let mut scored: Vec<Recommendation> = self
            .catalog
            .all_roles()
            .iter()
            .map(|role| Recommendation {
                job_title: role.id.clone(),
                similarity_score: self
                    .vectorizer
                    .pairwise_similarity(resume_text, &role.required_skills_text),
            })
            .collect();

        // Stable: equal scores keep catalog order.
        scored.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        scored.truncate(top_k);

        debug!(
            "Ranked {} roles, returning top {}",
            self.catalog.len(),
            scored.len()
        );

        RankedRecommendationList(scored)
    }

    pub fn rank_default(&self, resume_text: &str) -> RankedRecommendationList {
        self.rank(resume_text, DEFAULT_TOP_K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Arc<JobCatalog> {
        Arc::new(JobCatalog::from_rows(vec![
            ("Data Analyst", "sql, excel, python"),
            ("Web Developer", "html, css, javascript"),
            ("Backend Developer", "python, sql, docker, rest apis"),
            ("Designer", "figma, sketch"),
        ]))
    }

    #[test]
    fn test_empty_catalog() {
        let ranker = SimilarityRanker::new(Arc::new(JobCatalog::default()));
        assert!(ranker.rank("sql python", 3).is_empty());
    }

    #[test]
    fn test_fewer_roles_than_top_k() {
        let catalog = Arc::new(JobCatalog::from_rows(vec![("Data Analyst", "sql"), ("Tester", "selenium")]));
        let ranker = SimilarityRanker::new(catalog);
        let titles: Vec<String> = ranker.rank("sql", 3).into_vec().into_iter().map(|r| r.job_title).collect();
        assert_eq!(titles, vec!["Data Analyst", "Tester"]);
    }

    #[test]
    fn test_top_k_truncation_and_order() {
        let ranker = SimilarityRanker::new(sample_catalog());
        let ranked = ranker.rank_default("Experienced with SQL and Python projects, some Excel");

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked.first().unwrap().job_title, "Data Analyst");

        let scores: Vec<f64> = ranked.iter().map(|r| r.similarity_score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_identical_text_scores_one() {
        let ranker = SimilarityRanker::new(sample_catalog());
        let ranked = ranker.rank("html, css, javascript", 1);
        assert_eq!(ranked.first().unwrap().job_title, "Web Developer");
        assert!((ranked.first().unwrap().similarity_score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_resume_ties_keep_catalog_order() {
        let ranker = SimilarityRanker::new(sample_catalog());
        let ranked = ranker.rank("", 3);

        let titles: Vec<&str> = ranked.iter().map(|r| r.job_title.as_str()).collect();
        assert_eq!(titles, vec!["Data Analyst", "Web Developer", "Backend Developer"]);
        assert!(ranked.iter().all(|r| r.similarity_score == 0.0));
    }

    #[test]
    fn test_zero_top_k() {
        let ranker = SimilarityRanker::new(sample_catalog());
        assert!(ranker.rank("sql", 0).is_empty());
    }

    #[test]
    fn test_rank_is_idempotent() {
        let ranker = SimilarityRanker::new(sample_catalog());
        let resume = "Python developer: REST APIs, Docker, SQL databases";
        let first = ranker.rank(resume, 3);
        for _ in 0..5 {
            assert_eq!(ranker.rank(resume, 3), first);
        }
    }
}
