//! Data model for the extraction pipeline.
//!
//! Every stage produces a fresh immutable value consumed by the next stage.
//! Absence is always the empty string plus confidence 0, never a null
//! placeholder, so downstream consumers (the form-population UI) can merge
//! fields without null checks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scalar extraction result: the value as found in the document plus a
/// confidence score in [0, 1]. Confidence 0 means "not found" and the value
/// is empty in that case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    pub value: String,
    pub confidence: f64,
}

impl ExtractedField {
    pub fn found(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// The "not found" result: empty value, confidence 0.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        !self.value.is_empty()
    }
}

/// One job within the experience section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub job_title: String,
    pub employer: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

/// One degree/program within the education section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: String,
}

/// One project within the projects section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub technologies: String,
    pub description: String,
    pub link: String,
}

/// A structured record reconstructed from a multi-line block inside its
/// section. Tagged so callers can route entries without inspecting shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry_type", rename_all = "snake_case")]
pub enum ExtractedEntry {
    Experience(ExperienceEntry),
    Education(EducationEntry),
    Project(ProjectEntry),
}

/// A skill name with an optional category classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: Option<String>,
}

/// The sole externally visible artifact of the pipeline. JSON-serializable;
/// `confidence_scores` uses a BTreeMap so serialized output is stable for
/// byte-identical input (idempotence is a tested property).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<Skill>,
    pub projects: Vec<ProjectEntry>,
    pub confidence_scores: BTreeMap<String, f64>,
}

impl ExtractionResult {
    /// The "nothing found" result: decode succeeded but the document held no
    /// extractable text. Every confidence key is present and 0 so the caller
    /// can still render an empty-state form.
    pub fn empty() -> Self {
        let mut confidence_scores = BTreeMap::new();
        for key in [
            "full_name",
            "email",
            "phone",
            "location",
            "linkedin",
            "website",
            "skills",
            "experience",
            "education",
            "projects",
            "overall",
        ] {
            confidence_scores.insert(key.to_string(), 0.0);
        }
        Self {
            confidence_scores,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_field_is_empty_with_zero_confidence() {
        let f = ExtractedField::absent();
        assert_eq!(f.value, "");
        assert_eq!(f.confidence, 0.0);
        assert!(!f.is_present());
    }

    #[test]
    fn test_found_clamps_confidence() {
        assert_eq!(ExtractedField::found("x", 1.5).confidence, 1.0);
        assert_eq!(ExtractedField::found("x", -0.2).confidence, 0.0);
    }

    #[test]
    fn test_entry_serializes_with_tag() {
        let entry = ExtractedEntry::Experience(ExperienceEntry {
            job_title: "Engineer".to_string(),
            ..Default::default()
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["entry_type"], "experience");
        assert_eq!(json["job_title"], "Engineer");
    }

    #[test]
    fn test_empty_result_has_all_confidence_keys_at_zero() {
        let result = ExtractionResult::empty();
        assert_eq!(result.confidence_scores["overall"], 0.0);
        assert_eq!(result.confidence_scores.len(), 11);
        assert!(result.confidence_scores.values().all(|&v| v == 0.0));
        assert!(result.experience.is_empty());
        assert!(result.skills.is_empty());
    }
}
