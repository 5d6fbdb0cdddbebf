//! TF-IDF vectors and cosine similarity over a small local corpus

use crate::processing::text_processor::TextProcessor;
use std::collections::BTreeMap;

/// A sparse, L2-normalized TF-IDF row keyed by term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfidfVector {
    weights: BTreeMap<String, f64>,
}

impl TfidfVector {
    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &TfidfVector) -> f64 {
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .map(|(term, w)| w * large.weight(term))
            .sum()
    }

    /// Cosine similarity clamped to `[0, 1]`; zero vectors score 0.
    pub fn cosine(&self, other: &TfidfVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        let denominator = self.norm() * other.norm();
        if denominator == 0.0 {
            return 0.0;
        }
        (self.dot(other) / denominator).clamp(0.0, 1.0)
    }
}

/// Fits term weights on a corpus: raw counts, smoothed IDF
/// (`ln((1 + n) / (1 + df)) + 1`) and L2-normalized rows.
pub struct TfidfVectorizer {
    processor: TextProcessor,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    /// Vectorize every document against the vocabulary of this corpus only.
    pub fn fit_transform(&self, documents: &[&str]) -> Vec<TfidfVector> {
        let counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = BTreeMap::new();
                for term in self.processor.terms(doc) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: BTreeMap<&str, f64> = document_frequency
            .iter()
            .map(|(&term, &df)| (term, ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0))
            .collect();

        counts
            .iter()
            .map(|tf| {
                let mut weights: BTreeMap<String, f64> = tf
                    .iter()
                    .map(|(term, &count)| (term.clone(), count as f64 * idf[term.as_str()]))
                    .collect();

                let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for w in weights.values_mut() {
                        *w /= norm;
                    }
                }
                TfidfVector { weights }
            })
            .collect()
    }

    /// Cosine similarity of two texts in their own two-document space.
    pub fn pairwise_similarity(&self, a: &str, b: &str) -> f64 {
        let vectors = self.fit_transform(&[a, b]);
        vectors[0].cosine(&vectors[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_texts() {
        let vectorizer = TfidfVectorizer::new();
        let text = "Rust, Python and SQL developer";
        assert!(approx_eq(vectorizer.pairwise_similarity(text, text), 1.0));
    }

    #[test]
    fn test_disjoint_texts() {
        let vectorizer = TfidfVectorizer::new();
        assert_eq!(vectorizer.pairwise_similarity("html css", "sql excel"), 0.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let vectorizer = TfidfVectorizer::new();
        assert_eq!(vectorizer.pairwise_similarity("", "sql, excel"), 0.0);
        assert_eq!(vectorizer.pairwise_similarity("", ""), 0.0);

        // single-letter tokens are not terms
        let vectors = vectorizer.fit_transform(&["a b c", "sql"]);
        assert!(vectors[0].is_zero());
        assert!(!vectors[1].is_zero());
    }

    #[test]
    fn test_smoothed_idf_weights() {
        let vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&["sql python", "sql excel"]);

        // shared term: idf = 1; single-document term: idf = ln(3/2) + 1
        let shared = 1.0_f64;
        let unique = (1.5_f64).ln() + 1.0;
        let norm = (shared * shared + unique * unique).sqrt();

        assert!(approx_eq(vectors[0].weight("sql"), shared / norm));
        assert!(approx_eq(vectors[0].weight("python"), unique / norm));
        assert!(approx_eq(vectors[0].weight("excel"), 0.0));
        assert!(approx_eq(vectors[0].norm(), 1.0));

        let expected = (shared / norm) * (shared / norm);
        assert!(approx_eq(vectors[0].cosine(&vectors[1]), expected));
    }

    #[test]
    fn test_term_frequency_counts() {
        let vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&["sql sql python", "sql"]);
        assert!(vectors[0].weight("sql") > vectors[0].weight("python"));
        assert!(vectors[1].weight("sql") > 0.0);
        assert!(vectors[1].weight("python") == 0.0);
    }
}
