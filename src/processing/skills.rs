//! Skill token normalization

use crate::config::SkillConfig;
use std::collections::{HashMap, HashSet};

/// Canonical skill -> accepted spellings
const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    ("python", &["py", "python3"]),
    ("java", &["java se", "java ee"]),
    ("javascript", &["js", "ecmascript"]),
    ("typescript", &["ts"]),
    ("react", &["reactjs", "react.js", "react js"]),
    ("node.js", &["nodejs", "node", "node js"]),
    ("vue.js", &["vuejs", "vue"]),
    ("angular", &["angularjs"]),
    ("go", &["golang"]),
    ("docker", &["containerization"]),
    ("kubernetes", &["k8s"]),
    ("mongodb", &["mongo"]),
    ("postgresql", &["postgres"]),
    ("aws", &["amazon web services"]),
    ("gcp", &["google cloud", "google cloud platform"]),
    ("azure", &["microsoft azure"]),
    ("machine learning", &["ml", "deep learning", "dl"]),
    ("ai", &["artificial intelligence"]),
    ("devops", &["devsecops"]),
    ("ci/cd", &["cicd", "ci cd", "continuous integration", "continuous deployment"]),
    ("css", &["css3", "scss", "sass"]),
    ("html", &["html5"]),
    ("elasticsearch", &["elastic search", "elk"]),
];

/// Trim, lowercase and collapse whitespace. Empty input yields `None`.
pub fn clean_skill(raw: &str) -> Option<String> {
    let cleaned = raw
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Clean every token and drop empties and repeats, first occurrence wins
pub fn clean_skills<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|s| clean_skill(s.as_ref()))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Maps skill spellings onto one canonical token
#[derive(Debug, Clone)]
pub struct SkillNormalizer {
    aliases: HashMap<String, String>,
}

impl Default for SkillNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillNormalizer {
    pub fn new() -> Self {
        Self::from_config(&SkillConfig::default())
    }

    pub fn from_config(config: &SkillConfig) -> Self {
        let mut aliases = HashMap::new();

        for (canonical, spellings) in BUILTIN_ALIASES {
            for spelling in *spellings {
                aliases.insert(spelling.to_string(), canonical.to_string());
            }
        }

        for (alias, canonical) in &config.aliases {
            if let (Some(alias), Some(canonical)) = (clean_skill(alias), clean_skill(canonical)) {
                aliases.insert(alias, canonical);
            }
        }

        Self { aliases }
    }

    /// Canonical form of one skill, `None` for blank input
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let cleaned = clean_skill(raw)?;
        Some(self.aliases.get(&cleaned).cloned().unwrap_or(cleaned))
    }

    /// Canonicalize a skill list, dropping blanks and repeats
    pub fn normalize_all<S: AsRef<str>>(&self, raw: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        raw.iter()
            .filter_map(|s| self.normalize(s.as_ref()))
            .filter(|s| seen.insert(s.clone()))
            .collect()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_clean_skill() {
        assert_eq!(
            clean_skill("  Machine   Learning "),
            Some("machine learning".to_string())
        );
        assert_eq!(clean_skill("   "), None);
        assert_eq!(clean_skill(""), None);
    }

    #[test]
    fn test_clean_skills_dedups_in_order() {
        let cleaned = clean_skills(["Python", "docker", " python", "", "Docker "]);
        assert_eq!(cleaned, vec!["python", "docker"]);
    }

    #[test]
    fn test_builtin_aliases() {
        let normalizer = SkillNormalizer::new();

        assert_eq!(normalizer.normalize("ReactJS").as_deref(), Some("react"));
        assert_eq!(normalizer.normalize("k8s").as_deref(), Some("kubernetes"));
        assert_eq!(normalizer.normalize("Node").as_deref(), Some("node.js"));
        assert_eq!(normalizer.normalize("Golang").as_deref(), Some("go"));
        assert_eq!(normalizer.normalize("rust").as_deref(), Some("rust"));
    }

    #[test]
    fn test_resume_extractor_spellings() {
        let normalizer = SkillNormalizer::new();
        let skills = normalizer.normalize_all(&[
            "Java EE",
            "SCSS",
            "Sass",
            "DevSecOps",
            "ELK",
            "Containerization",
            "Continuous Deployment",
            "DL",
            "Deep Learning",
        ]);

        assert_eq!(
            skills,
            vec!["java", "css", "devops", "elasticsearch", "docker", "ci/cd", "machine learning"]
        );
    }

    #[test]
    fn test_normalize_all_collapses_aliases() {
        let normalizer = SkillNormalizer::new();
        let skills = normalizer.normalize_all(&["postgres", "PostgreSQL", "k8s", "  "]);

        assert_eq!(skills, vec!["postgresql", "kubernetes"]);
    }

    #[test]
    fn test_config_aliases_override() {
        let mut aliases = BTreeMap::new();
        aliases.insert("RustLang".to_string(), "Rust".to_string());
        aliases.insert("node".to_string(), "nodejs".to_string());

        let normalizer = SkillNormalizer::from_config(&SkillConfig { aliases });

        assert_eq!(normalizer.normalize("rustlang").as_deref(), Some("rust"));
        assert_eq!(normalizer.normalize("node").as_deref(), Some("nodejs"));
        assert!(normalizer.alias_count() > 2);
    }
}
