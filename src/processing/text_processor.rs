//! Text normalization and tokenization

use crate::processing::skills::SkillSet;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    term_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        // Words of two or more word characters.
        let term_regex = Regex::new(r"\b\w\w+\b").expect("Invalid term regex");

        Self { term_regex }
    }

    /// Split a comma-separated requirement list into skill phrases.
    pub fn skill_phrases(&self, text: &str) -> SkillSet {
        text.split(',').collect()
    }

    /// Word-level tokens made entirely of alphabetic characters.
    pub fn alphabetic_tokens<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        text.unicode_words()
            .filter(|word| word.chars().all(char::is_alphabetic))
    }

    /// Skill tokens of a resume: lowercase alphabetic words, deduplicated.
    pub fn skill_tokens(&self, text: &str) -> SkillSet {
        self.alphabetic_tokens(text).collect()
    }

    /// Lowercased terms used for vector-space weighting.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.term_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_phrases() {
        let processor = TextProcessor::new();
        let skills = processor.skill_phrases(" SQL, Excel ,python,, sql ,Machine Learning,");

        assert_eq!(skills.len(), 4);
        assert!(skills.contains("sql"));
        assert!(skills.contains("excel"));
        assert!(skills.contains("python"));
        assert!(skills.contains("machine learning"));
    }

    #[test]
    fn test_skill_tokens_keep_alphabetic_words() {
        let processor = TextProcessor::new();
        let tokens = processor.skill_tokens("Python3, SQL (5 years) and C++ at ACME-Corp!");

        assert!(tokens.contains("sql"));
        assert!(tokens.contains("years"));
        assert!(tokens.contains("and"));
        assert!(!tokens.contains("python3"));
        assert!(!tokens.contains("5"));
        assert!(!tokens.contains("c++"));
    }

    #[test]
    fn test_skill_tokens_unicode() {
        let processor = TextProcessor::new();
        let tokens = processor.skill_tokens("Développeur Python à Zürich");

        assert!(tokens.contains("développeur"));
        assert!(tokens.contains("zürich"));
        assert!(tokens.contains("à"));
    }

    #[test]
    fn test_terms() {
        let processor = TextProcessor::new();
        let terms = processor.terms("Python, SQL & R. A node.js dev");

        assert_eq!(terms, vec!["python", "sql", "node", "js", "dev"]);
    }
}
