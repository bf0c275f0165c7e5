//! Job listing documents: `#` comment lines followed by JSON

use crate::error::{MatcherError, Result};
use crate::processing::records::{JobListing, MalformedJobRecord, RawJobListing};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Parsed job listings plus the records that needed defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobBatch {
    pub jobs: Vec<JobListing>,
    pub warnings: Vec<MalformedJobRecord>,
}

impl JobBatch {
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Drop every line whose first non-blank character is `#`
pub fn strip_comment_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a job document: a JSON array of jobs, or an object with a `jobs` array
pub fn parse_job_listings(content: &str) -> Result<JobBatch> {
    let json = strip_comment_lines(content);
    let document: Value = serde_json::from_str(&json)?;

    let records = match document {
        Value::Array(records) => records,
        Value::Object(mut object) => match object.remove("jobs") {
            Some(Value::Array(records)) => records,
            Some(_) => {
                return Err(MatcherError::JobStore("`jobs` must be an array".to_string()));
            }
            None => {
                return Err(MatcherError::JobStore(
                    "Expected an array of jobs or an object with a `jobs` key".to_string(),
                ));
            }
        },
        other => {
            return Err(MatcherError::JobStore(format!(
                "Expected an array of jobs, found {}",
                json_kind(&other)
            )));
        }
    };

    let mut batch = JobBatch::default();
    for (index, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            return Err(MatcherError::JobStore(format!(
                "Job record {} is {}, not an object",
                index,
                json_kind(&record)
            )));
        }

        let raw: RawJobListing = serde_json::from_value(record)?;
        let (job, missing) = JobListing::from_raw(raw);

        if !missing.is_empty() {
            warn!(
                "Job record {} ('{}') has missing or invalid {}; treating as empty",
                index,
                job.label(),
                missing.join(", ")
            );
            batch.warnings.push(MalformedJobRecord {
                index,
                label: job.label().to_string(),
                missing: missing.iter().map(|field| field.to_string()).collect(),
            });
        }
        batch.jobs.push(job);
    }

    Ok(batch)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Loads job documents from disk, caching parsed batches per path
pub struct JobStore {
    cache: HashMap<PathBuf, JobBatch>,
    enable_cache: bool,
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JobStore {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn load(&mut self, path: &Path) -> Result<JobBatch> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                info!("Using cached job listings for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::JobStore(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).await?;
        let batch = parse_job_listings(&content)?;
        info!(
            "Loaded {} job listings from {} ({} with missing fields)",
            batch.len(),
            path.display(),
            batch.warnings.len()
        );

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), batch.clone());
        }

        Ok(batch)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
