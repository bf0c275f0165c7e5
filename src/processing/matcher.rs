//! Candidate-to-job matching and its mirror, candidate filtering
//!
//! Every call fits its own TF-IDF model over exactly the documents of that
//! call: the query document first, then the documents being ranked. Scores
//! are therefore relative to the request and not comparable across calls
//! with different corpora. A `Matcher` carries configuration only and can be
//! shared freely between threads.

use crate::config::{Config, ScoringConfig};
use crate::error::{MatcherError, Result};
use crate::processing::records::{
    CandidateMatch, CandidateProfile, CandidateRecord, JobListing, MatchResult,
};
use crate::processing::skill_gap::{SkillGapAnalyzer, SkillGapReport};
use crate::processing::skills::SkillNormalizer;
use crate::processing::text_processor::TextProcessor;
use crate::processing::tfidf::TfidfVectorizer;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub struct Matcher {
    text_processor: TextProcessor,
    skill_normalizer: SkillNormalizer,
    vectorizer: TfidfVectorizer,
    gap_analyzer: SkillGapAnalyzer,
    scoring: ScoringConfig,
}

/// Job matching request as received from a caller. Absent fields are errors,
/// present-but-empty ones are not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub candidate_profile: Option<CandidateProfile>,
    #[serde(default)]
    pub job_listings: Option<Vec<JobListing>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub job_requirements: Option<JobListing>,
    #[serde(default)]
    pub candidates: Option<Vec<CandidateRecord>>,
}

/// Anything carrying a similarity score
pub trait Scored {
    fn match_score(&self) -> f32;
}

impl Scored for MatchResult {
    fn match_score(&self) -> f32 {
        self.match_score
    }
}

impl Scored for CandidateMatch {
    fn match_score(&self) -> f32 {
        self.match_score
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            text_processor: TextProcessor::from_config(&config.keywords),
            skill_normalizer: SkillNormalizer::from_config(&config.skills),
            vectorizer: TfidfVectorizer::from_config(&config.vectorizer),
            gap_analyzer: SkillGapAnalyzer::with_threshold(config.scoring.fuzzy_threshold),
            scoring: config.scoring.clone(),
        }
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Skills followed by keywords extracted from experience
    pub fn candidate_text(&self, profile: &CandidateProfile) -> String {
        let mut terms = self.skill_normalizer.normalize_all(&profile.skills);
        terms.extend(self.text_processor.experience_keywords(&profile.experience));
        terms.join(" ")
    }

    /// Required skills followed by the description
    pub fn job_text(&self, job: &JobListing) -> String {
        let mut parts = self.skill_normalizer.normalize_all(&job.required_skills);
        let description = job.description.trim();
        if !description.is_empty() {
            parts.push(description.to_string());
        }
        parts.join(" ")
    }

    /// Score every job against the candidate, best first.
    ///
    /// Returns one result per job, or nothing when the candidate has no
    /// comparison text. Equal scores keep their input order.
    pub fn rank_jobs(&self, candidate: &CandidateProfile, jobs: &[JobListing]) -> Vec<MatchResult> {
        let query = self.candidate_text(candidate);
        if query.trim().is_empty() {
            info!("Candidate comparison text is empty; no jobs ranked");
            return Vec::new();
        }
        if jobs.is_empty() {
            debug!("No job listings supplied");
            return Vec::new();
        }

        let documents: Vec<String> = jobs.iter().map(|job| self.job_text(job)).collect();
        let scores = self.score_documents(query, documents);

        let results = jobs
            .iter()
            .zip(scores)
            .map(|(job, match_score)| MatchResult {
                job: job.clone(),
                match_score,
            })
            .collect();

        let ranked = rank_descending(results);
        if let Some(top) = ranked.first() {
            debug!(
                "Ranked {} jobs, top '{}' at {:.3}",
                ranked.len(),
                top.job.label(),
                top.match_score
            );
        }
        ranked
    }

    /// Score every candidate against the job's requirements, best first.
    ///
    /// Returns nothing when there are no candidates or the job has no
    /// comparison text.
    pub fn filter_candidates(
        &self,
        job: &JobListing,
        candidates: &[CandidateRecord],
    ) -> Vec<CandidateMatch> {
        let query = self.job_text(job);
        if query.trim().is_empty() {
            info!("Job '{}' has no comparison text; no candidates ranked", job.label());
            return Vec::new();
        }
        if candidates.is_empty() {
            debug!("No candidates supplied for '{}'", job.label());
            return Vec::new();
        }

        let documents: Vec<String> = candidates
            .iter()
            .map(|candidate| self.candidate_text(&candidate.profile))
            .collect();
        let scores = self.score_documents(query, documents);

        let results = candidates
            .iter()
            .zip(scores)
            .map(|(candidate, match_score)| CandidateMatch {
                candidate: candidate.clone(),
                match_score,
            })
            .collect();

        let ranked = rank_descending(results);
        debug!("Ranked {} candidates for '{}'", ranked.len(), job.label());
        ranked
    }

    /// Request-level job matching; absent inputs are rejected
    pub fn match_jobs(&self, request: &MatchRequest) -> Result<Vec<MatchResult>> {
        let candidate = request
            .candidate_profile
            .as_ref()
            .ok_or(MatcherError::MissingInput("candidate_profile"))?;
        let jobs = request
            .job_listings
            .as_deref()
            .ok_or(MatcherError::MissingInput("job_listings"))?;

        Ok(self.rank_jobs(candidate, jobs))
    }

    /// Request-level candidate filtering; absent inputs are rejected
    pub fn filter(&self, request: &FilterRequest) -> Result<Vec<CandidateMatch>> {
        let job = request
            .job_requirements
            .as_ref()
            .ok_or(MatcherError::MissingInput("job_requirements"))?;
        let candidates = request
            .candidates
            .as_deref()
            .ok_or(MatcherError::MissingInput("candidates"))?;

        Ok(self.filter_candidates(job, candidates))
    }

    /// Required-skill coverage for one pair. Does not touch scoring.
    pub fn explain(
        &self,
        candidate: &CandidateProfile,
        job: &JobListing,
    ) -> Result<SkillGapReport> {
        let candidate_skills = self.skill_normalizer.normalize_all(&candidate.skills);
        let required_skills = self.skill_normalizer.normalize_all(&job.required_skills);

        self.gap_analyzer
            .analyze(&candidate_skills, &candidate.experience, &required_skills)
    }

    /// Whether the best of a ranked list clears the strong-match threshold
    pub fn has_strong_match<T: Scored>(&self, ranked: &[T]) -> bool {
        has_strong_match(ranked, self.scoring.strong_match_threshold)
    }

    /// Leading entries of a ranked list scoring above `min_match_score`
    pub fn shortlist<'a, T: Scored>(&self, ranked: &'a [T]) -> &'a [T] {
        shortlist(ranked, self.scoring.min_match_score)
    }

    /// Fit a fresh model over `[query, documents..]` and score each document
    fn score_documents(&self, query: String, documents: Vec<String>) -> Vec<f32> {
        let mut corpus = Vec::with_capacity(documents.len() + 1);
        corpus.push(query);
        corpus.extend(documents);

        let model = self.vectorizer.fit_transform(&corpus);
        model
            .similarities_to(0)
            .into_iter()
            .map(|(_, score)| score)
            .collect()
    }
}

/// Stable sort by score, highest first
pub fn rank_descending<T: Scored>(mut results: Vec<T>) -> Vec<T> {
    results.sort_by(|a, b| {
        b.match_score()
            .partial_cmp(&a.match_score())
            .unwrap_or(Ordering::Equal)
    });
    results
}

/// Leading entries of a ranked list scoring strictly above `min_score`
pub fn shortlist<T: Scored>(ranked: &[T], min_score: f32) -> &[T] {
    let end = ranked.partition_point(|r| r.match_score() > min_score);
    &ranked[..end]
}

/// True when the top entry scores strictly above `threshold`
pub fn has_strong_match<T: Scored>(ranked: &[T], threshold: f32) -> bool {
    ranked.first().is_some_and(|top| top.match_score() > threshold)
}
