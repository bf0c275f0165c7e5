//! Text processing, term weighting and matching

pub mod records;
pub mod text_processor;
pub mod skills;
pub mod similarity;
pub mod tfidf;
pub mod skill_gap;
pub mod matcher;
