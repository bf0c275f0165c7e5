//! Required-skill coverage for a candidate/job pair
//!
//! Explains a match score in terms a recruiter reads: which required skills
//! the candidate shows verbatim, which only under a near spelling, and which
//! are missing. It has no influence on the TF-IDF score itself.

use crate::error::{MatcherError, Result};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strsim::jaro_winkler;

pub struct SkillGapAnalyzer {
    fuzzy_threshold: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzySkillMatch {
    pub required_skill: String,
    pub candidate_skill: String,
    pub similarity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub matched_skills: Vec<String>,
    pub fuzzy_matches: Vec<FuzzySkillMatch>,
    pub missing_skills: Vec<String>,
    /// Share of required skills matched exactly or fuzzily
    pub coverage: f32,
}

impl Default for SkillGapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillGapAnalyzer {
    pub fn new() -> Self {
        Self::with_threshold(0.9)
    }

    /// Threshold is clamped to `[0, 1]`
    pub fn with_threshold(fuzzy_threshold: f32) -> Self {
        Self {
            fuzzy_threshold: fuzzy_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn fuzzy_threshold(&self) -> f32 {
        self.fuzzy_threshold
    }

    /// Compare normalized required skills against the candidate's skills
    /// and experience text
    pub fn analyze<S: AsRef<str>>(
        &self,
        candidate_skills: &[String],
        experience: &[S],
        required_skills: &[String],
    ) -> Result<SkillGapReport> {
        if required_skills.is_empty() {
            return Ok(SkillGapReport {
                matched_skills: Vec::new(),
                fuzzy_matches: Vec::new(),
                missing_skills: Vec::new(),
                coverage: 1.0,
            });
        }

        let haystack = candidate_skills
            .iter()
            .map(String::as_str)
            .chain(experience.iter().map(|e| e.as_ref()))
            .collect::<Vec<_>>()
            .join(" ; ");

        let found = self.find_exact_matches(&haystack, required_skills)?;

        let mut matched_skills = Vec::new();
        let mut fuzzy_matches = Vec::new();
        let mut missing_skills = Vec::new();

        for (index, skill) in required_skills.iter().enumerate() {
            if found.contains(&index) {
                matched_skills.push(skill.clone());
            } else if let Some(fuzzy) = self.best_fuzzy_match(skill, candidate_skills) {
                fuzzy_matches.push(fuzzy);
            } else {
                missing_skills.push(skill.clone());
            }
        }

        let covered = matched_skills.len() + fuzzy_matches.len();
        let coverage = covered as f32 / required_skills.len() as f32;

        Ok(SkillGapReport {
            matched_skills,
            fuzzy_matches,
            missing_skills,
            coverage,
        })
    }

    /// Indices of required skills occurring as whole words in `haystack`
    fn find_exact_matches(
        &self,
        haystack: &str,
        required_skills: &[String],
    ) -> Result<HashSet<usize>> {
        // Overlapping search so "react" is still seen inside "react native"
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(required_skills)
            .map_err(|e| {
                MatcherError::Processing(format!("Failed to build skill matcher: {}", e))
            })?;

        let found = matcher
            .find_overlapping_iter(haystack)
            .filter(|mat| is_word_boundary(haystack, mat.start(), mat.end()))
            .map(|mat| mat.pattern().as_usize())
            .collect();

        Ok(found)
    }

    fn best_fuzzy_match(
        &self,
        required: &str,
        candidate_skills: &[String],
    ) -> Option<FuzzySkillMatch> {
        candidate_skills
            .iter()
            .map(|skill| (skill, jaro_winkler(required, skill) as f32))
            .filter(|(_, similarity)| *similarity >= self.fuzzy_threshold)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(skill, similarity)| FuzzySkillMatch {
                required_skill: required.to_string(),
                candidate_skill: skill.clone(),
                similarity,
            })
    }
}

fn is_word_boundary(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();

    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_matches_from_skills_and_experience() {
        let analyzer = SkillGapAnalyzer::new();
        let report = analyzer
            .analyze(
                &skills(&["python"]),
                &["Built pipelines with Docker and Kubernetes"],
                &skills(&["python", "docker", "kubernetes", "java"]),
            )
            .unwrap();

        assert_eq!(report.matched_skills, vec!["python", "docker", "kubernetes"]);
        assert!(report.fuzzy_matches.is_empty());
        assert_eq!(report.missing_skills, vec!["java"]);
        assert!((report.coverage - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_whole_word_only() {
        let analyzer = SkillGapAnalyzer::new();
        let report = analyzer
            .analyze(
                &skills(&["javascript"]),
                &["Going forward with frontend work"],
                &skills(&["java", "go"]),
            )
            .unwrap();

        assert!(report.matched_skills.is_empty());
        assert_eq!(report.missing_skills, vec!["java", "go"]);
        assert_eq!(report.coverage, 0.0);
    }

    #[test]
    fn test_multi_word_and_overlapping_skills() {
        let analyzer = SkillGapAnalyzer::new();
        let report = analyzer
            .analyze(
                &skills(&["react native"]),
                &["Applied Machine Learning to fraud detection"],
                &skills(&["machine learning", "react", "react native"]),
            )
            .unwrap();

        assert_eq!(report.matched_skills, vec!["machine learning", "react", "react native"]);
        assert_eq!(report.coverage, 1.0);
    }

    #[test]
    fn test_fuzzy_match() {
        let analyzer = SkillGapAnalyzer::new();
        let report = analyzer
            .analyze::<&str>(&skills(&["kubernets"]), &[], &skills(&["kubernetes"]))
            .unwrap();

        assert!(report.matched_skills.is_empty());
        assert_eq!(report.fuzzy_matches.len(), 1);
        assert_eq!(report.fuzzy_matches[0].candidate_skill, "kubernets");
        assert!(report.fuzzy_matches[0].similarity >= analyzer.fuzzy_threshold());
        assert_eq!(report.coverage, 1.0);
    }

    #[test]
    fn test_no_required_skills() {
        let analyzer = SkillGapAnalyzer::new();
        let report = analyzer
            .analyze::<&str>(&skills(&["python"]), &[], &[])
            .unwrap();

        assert_eq!(report.coverage, 1.0);
        assert!(report.missing_skills.is_empty());
    }

    #[test]
    fn test_threshold_clamped() {
        assert_eq!(SkillGapAnalyzer::with_threshold(1.7).fuzzy_threshold(), 1.0);
        assert_eq!(SkillGapAnalyzer::with_threshold(-0.2).fuzzy_threshold(), 0.0);
    }
}
