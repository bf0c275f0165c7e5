//! Candidate-to-job matching library

pub mod config;
pub mod error;
pub mod input;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use processing::matcher::{FilterRequest, MatchRequest, Matcher};
pub use processing::records::{
    CandidateMatch, CandidateProfile, CandidateRecord, JobListing, MatchResult,
};
