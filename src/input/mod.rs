//! Input processing module
//! Handles loading job listing documents

pub mod job_store;

pub use job_store::{parse_job_listings, JobBatch, JobStore};
