//! Candidate and job records, plus the scored copies the matcher returns

use crate::processing::skills::clean_skills;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Structured profile produced by the resume extractor.
///
/// Only `skills` and `experience` take part in matching, the remaining
/// fields are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_experience")]
    pub experience: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<Value>,

    #[serde(default)]
    pub contact_info: ContactInfo,
}

impl CandidateProfile {
    pub fn new<S: AsRef<str>, E: AsRef<str>>(skills: &[S], experience: &[E]) -> Self {
        Self {
            skills: clean_skills(skills),
            experience: experience.iter().map(|e| e.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn has_content(&self) -> bool {
        !self.skills.is_empty() || self.experience.iter().any(|e| !e.trim().is_empty())
    }
}

/// A position offered by the job store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawJobListing")]
pub struct JobListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub required_skills: Vec<String>,
    pub description: String,
    /// Fields the matcher does not read, kept so results echo the input
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl JobListing {
    pub fn new<S: AsRef<str>>(required_skills: &[S], description: impl Into<String>) -> Self {
        Self {
            required_skills: clean_skills(required_skills),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Display label, falling back from title to id
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<untitled>")
    }

    /// Build from the loosely-typed wire shape, reporting fields that were
    /// absent or unusable
    pub(crate) fn from_raw(raw: RawJobListing) -> (Self, Vec<&'static str>) {
        let mut missing = Vec::new();

        let required_skills = match raw.required_skills {
            Some(Value::Array(entries)) => {
                let total = entries.len();
                let skills: Vec<String> = entries
                    .into_iter()
                    .filter_map(|entry| match entry {
                        Value::String(skill) => Some(skill),
                        _ => None,
                    })
                    .collect();
                if skills.len() != total {
                    missing.push("required_skills");
                }
                clean_skills(skills)
            }
            _ => {
                missing.push("required_skills");
                Vec::new()
            }
        };

        let description = match raw.description {
            Some(Value::String(description)) => description,
            _ => {
                missing.push("description");
                String::new()
            }
        };

        let job = Self {
            id: raw.id.and_then(id_to_string).or_else(|| raw.job_id.and_then(id_to_string)),
            title: raw.title.and_then(text_field),
            company: raw.company.and_then(text_field),
            required_skills,
            description,
            extra: raw.extra,
        };

        (job, missing)
    }
}

/// Wire shape of a job record before defaults are applied.
///
/// Every field is untyped so a single odd value degrades that record
/// instead of failing the document it came in.
#[derive(Debug, Deserialize)]
pub(crate) struct RawJobListing {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    job_id: Option<Value>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    company: Option<Value>,
    #[serde(default)]
    required_skills: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<RawJobListing> for JobListing {
    fn from(raw: RawJobListing) -> Self {
        let (job, missing) = JobListing::from_raw(raw);
        if !missing.is_empty() {
            warn!(
                "Job record '{}' has missing or invalid {}; treating as empty",
                job.label(),
                missing.join(", ")
            );
        }
        job
    }
}

/// Job identifiers arrive as strings or bare numbers
fn id_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn text_field(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// A job with its similarity to the candidate attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub job: JobListing,
    pub match_score: f32,
}

/// A candidate entry submitted to the candidate filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, alias = "candidate_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub profile: CandidateProfile,
}

impl CandidateRecord {
    pub fn new(id: impl Into<String>, profile: CandidateProfile) -> Self {
        Self {
            id: Some(id.into()),
            profile,
        }
    }
}

impl From<CandidateProfile> for CandidateRecord {
    fn from(profile: CandidateProfile) -> Self {
        Self { id: None, profile }
    }
}

/// A candidate with its similarity to the job attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    pub match_score: f32,
}

/// One experience entry as the extractor may emit it
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExperienceEntry {
    Text(String),
    Detailed {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        company: Option<String>,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        highlights: Vec<String>,
    },
}

impl ExperienceEntry {
    fn into_text(self) -> String {
        match self {
            ExperienceEntry::Text(text) => text,
            ExperienceEntry::Detailed {
                title,
                company,
                description,
                highlights,
            } => [title, company, description]
                .into_iter()
                .flatten()
                .chain(highlights)
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn deserialize_skills<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(clean_skills(raw.unwrap_or_default()))
}

fn deserialize_experience<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<ExperienceEntry>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(ExperienceEntry::into_text)
        .collect())
}

/// A job record that was accepted with defaults filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MalformedJobRecord {
    pub index: usize,
    pub label: String,
    /// Fields that were absent or had the wrong type
    pub missing: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_builder() {
        let profile =
            CandidateProfile::new(&["Rust", "rust"], &["Wrote a parser"]).with_name("Ada");

        assert_eq!(profile.name.as_deref(), Some("Ada"));
        assert_eq!(profile.skills, vec!["rust"]);
        assert!(profile.has_content());
    }

    #[test]
    fn test_profile_defaults_and_cleaning() {
        let profile: CandidateProfile = serde_json::from_value(json!({
            "name": "John Doe",
            "skills": [" Python", "DOCKER", "python"],
            "contact_info": { "email": "john.doe@example.com" }
        }))
        .unwrap();

        assert_eq!(profile.skills, vec!["python", "docker"]);
        assert!(profile.experience.is_empty());
        assert_eq!(profile.contact_info.email.as_deref(), Some("john.doe@example.com"));
        assert!(profile.contact_info.phone.is_none());
        assert!(profile.has_content());
    }

    #[test]
    fn test_profile_null_fields() {
        let profile: CandidateProfile =
            serde_json::from_value(json!({ "skills": null, "experience": null })).unwrap();

        assert!(profile.skills.is_empty());
        assert!(profile.experience.is_empty());
        assert!(!profile.has_content());
    }

    #[test]
    fn test_structured_experience_flattened() {
        let profile: CandidateProfile = serde_json::from_value(json!({
            "experience": [
                "Software Developer at StartUp Inc",
                {
                    "title": "Senior Engineer",
                    "company": "Tech Corp",
                    "description": "Led ML pipeline"
                },
                { "title": "Intern", "highlights": ["Wrote tests"] }
            ]
        }))
        .unwrap();

        assert_eq!(
            profile.experience,
            vec![
                "Software Developer at StartUp Inc",
                "Senior Engineer Tech Corp Led ML pipeline",
                "Intern Wrote tests",
            ]
        );
    }

    #[test]
    fn test_job_listing_missing_fields_default() {
        let job: JobListing = serde_json::from_value(json!({
            "job_id": 42,
            "title": "DevOps Engineer",
            "location": "Remote"
        }))
        .unwrap();

        assert_eq!(job.id.as_deref(), Some("42"));
        assert!(job.required_skills.is_empty());
        assert!(job.description.is_empty());
        assert_eq!(job.extra.get("location"), Some(&json!("Remote")));
    }

    #[test]
    fn test_from_raw_reports_missing() {
        let raw: RawJobListing =
            serde_json::from_value(json!({ "id": "job1", "description": "Cloud work" })).unwrap();

        let (job, missing) = JobListing::from_raw(raw);
        assert_eq!(missing, vec!["required_skills"]);
        assert_eq!(job.description, "Cloud work");
    }

    #[test]
    fn test_from_raw_degrades_bad_types() {
        let raw: RawJobListing = serde_json::from_value(json!({
            "id": "a",
            "job_id": "b",
            "title": 7,
            "required_skills": ["Python", null, 3],
            "description": ["not", "text"]
        }))
        .unwrap();

        let (job, missing) = JobListing::from_raw(raw);
        assert_eq!(job.id.as_deref(), Some("a"));
        assert!(job.title.is_none());
        assert_eq!(job.required_skills, vec!["python"]);
        assert!(job.description.is_empty());
        assert_eq!(missing, vec!["required_skills", "description"]);
        assert!(job.extra.is_empty());
    }

    #[test]
    fn test_job_id_used_when_id_absent() {
        let job: JobListing = serde_json::from_value(json!({
            "id": null,
            "job_id": 9,
            "required_skills": "python, java",
            "description": "Data work"
        }))
        .unwrap();

        assert_eq!(job.id.as_deref(), Some("9"));
        assert!(job.required_skills.is_empty());
        assert_eq!(job.description, "Data work");
    }

    #[test]
    fn test_match_result_echoes_job_fields() {
        let job = JobListing::new(&["python"], "python role")
            .with_id("job1")
            .with_title("ML Engineer")
            .with_company("Data Insights");
        let result = MatchResult {
            job,
            match_score: 0.5,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["id"], json!("job1"));
        assert_eq!(value["title"], json!("ML Engineer"));
        assert_eq!(value["company"], json!("Data Insights"));
        assert_eq!(value["required_skills"], json!(["python"]));
        assert_eq!(value["description"], json!("python role"));
        assert_eq!(value["match_score"], json!(0.5));
    }

    #[test]
    fn test_candidate_record_flattened() {
        let record: CandidateRecord = serde_json::from_value(json!({
            "candidate_id": "c-7",
            "skills": ["Rust"],
            "experience": ["Systems programming"]
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("c-7"));
        assert_eq!(record.profile.skills, vec!["rust"]);
        assert_eq!(record.profile.experience, vec!["Systems programming"]);
    }
}
