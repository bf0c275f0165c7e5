//! Keyword extraction from free-text experience entries

use crate::config::KeywordConfig;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Turns experience blurbs into content-bearing tokens
#[derive(Debug, Clone)]
pub struct TextProcessor {
    stop_words: HashSet<String>,
    min_token_len: usize,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::from_config(&KeywordConfig::default())
    }

    pub fn from_config(config: &KeywordConfig) -> Self {
        let mut stop_words = Self::create_stop_words();
        stop_words.extend(
            config
                .extra_stop_words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );

        Self {
            stop_words,
            min_token_len: config.min_token_len,
        }
    }

    /// Extract keywords in order of occurrence.
    ///
    /// Tokens are lowercased Unicode words longer than `min_token_len`
    /// characters, with stop words and purely numeric tokens removed.
    /// Duplicates are kept so term frequency survives into weighting.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize_unicode(text);
        let mut keywords = Vec::new();

        for word in normalized.unicode_words() {
            let token = word.to_lowercase();

            if token.chars().count() <= self.min_token_len {
                continue;
            }
            if !token.chars().any(|c| c.is_alphabetic()) {
                continue;
            }
            if self.stop_words.contains(&token) {
                continue;
            }
            keywords.push(token);
        }

        keywords
    }

    /// Keywords for a whole experience history, entry order preserved
    pub fn experience_keywords<S: AsRef<str>>(&self, entries: &[S]) -> Vec<String> {
        entries
            .iter()
            .flat_map(|entry| self.extract_keywords(entry.as_ref()))
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    fn normalize_unicode(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                '\u{2026}' => '.',
                _ => c,
            })
            .collect()
    }

    /// Common English stop words. Only entries longer than the minimum
    /// token length ever matter, the short ones are kept for custom configs.
    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "a", "about", "above", "after", "again", "against", "all", "also", "am", "an",
            "and", "any", "are", "as", "at", "be", "because", "been", "before", "being",
            "below", "between", "both", "but", "by", "can", "could", "did", "do", "does",
            "doing", "down", "during", "each", "either", "else", "etc", "ever", "every",
            "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
            "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if",
            "in", "into", "is", "it", "its", "itself", "just", "may", "me", "might", "more",
            "most", "must", "my", "myself", "neither", "no", "nor", "not", "now", "of",
            "off", "often", "on", "once", "only", "or", "other", "others", "otherwise",
            "our", "ours", "ourselves", "out", "over", "own", "per", "same", "shall", "she",
            "should", "since", "so", "some", "such", "than", "that", "the", "their",
            "theirs", "them", "themselves", "then", "there", "therefore", "these", "they",
            "this", "those", "though", "through", "thus", "to", "too", "under", "until",
            "up", "upon", "very", "via", "was", "we", "were", "what", "whatever", "when",
            "where", "whereas", "whether", "which", "while", "who", "whom", "whose", "why",
            "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
            "yourself", "yourselves",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}
