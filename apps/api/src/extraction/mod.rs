//! Document ingestion and field extraction.
//!
//! Pipeline: Loader -> Normalizer -> Segmenter -> Field Extractors ->
//! Confidence Aggregator -> Result Assembler. The whole run is a single-pass
//! synchronous computation over one uploaded document; the extractors are
//! mutually independent pure functions, so a sequential pass is correct and
//! fast enough at the 10 MiB bound. After a successful decode nothing in the
//! pipeline can fail: absence of data is data, not an error.

pub mod confidence;
pub mod docx;
pub mod entries;
pub mod fields;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod segmenter;
pub mod skills;

use std::collections::BTreeMap;

use tracing::debug;

use crate::extraction::confidence::{aggregate, entries_confidence, skills_confidence, FieldScore};
use crate::extraction::loader::{load, LoadError, RawDocument};
use crate::extraction::models::{
    EducationEntry, ExperienceEntry, ExtractedEntry, ExtractedField, ExtractionResult,
    ProjectEntry, Skill,
};
use crate::extraction::segmenter::{segment, HeadingLexicon};

/// Runs the full extraction pipeline over one validated upload.
///
/// Loader errors short-circuit; every later stage is total. A document that
/// decodes to blank text is a successful call whose result carries every
/// confidence at zero.
pub fn extract(
    raw: &RawDocument,
    lexicon: &HeadingLexicon,
) -> Result<ExtractionResult, LoadError> {
    let text = load(raw)?;
    let normalized = normalize::normalize(&text);
    if normalized.is_blank() {
        debug!("document decoded to blank text, returning empty result");
        return Ok(ExtractionResult::empty());
    }

    let sections = segment(&normalized, lexicon);
    debug!(
        lines = normalized.lines().len(),
        sections = sections.len(),
        "segmented document"
    );

    let full_name = fields::extract_name(&sections);
    let email = fields::extract_email(&sections);
    let phone = fields::extract_phone(&sections);
    let location = fields::extract_location(&sections);
    let linkedin = fields::extract_linkedin(&sections);
    let website = fields::extract_website(&sections);
    let experience = entries::extract_experience(&sections);
    let education = entries::extract_education(&sections);
    let projects = entries::extract_projects(&sections);
    let skills = skills::extract_skills(&sections);

    Ok(assemble(
        [
            ("full_name", full_name),
            ("email", email),
            ("phone", phone),
            ("location", location),
            ("linkedin", linkedin),
            ("website", website),
        ],
        experience,
        education,
        projects,
        skills,
    ))
}

/// Result Assembler: packages fields, entry lists, skills, and the aggregated
/// confidence map into the canonical result. Pure aggregation.
fn assemble(
    scalar_fields: [(&'static str, ExtractedField); 6],
    experience: Vec<ExtractedEntry>,
    education: Vec<ExtractedEntry>,
    projects: Vec<ExtractedEntry>,
    skills: Vec<Skill>,
) -> ExtractionResult {
    let mut field_scores: BTreeMap<String, FieldScore> = scalar_fields
        .iter()
        .map(|(name, field)| {
            (
                name.to_string(),
                FieldScore::new(field.confidence, field.is_present()),
            )
        })
        .collect();
    field_scores.insert(
        "skills".to_string(),
        FieldScore::new(skills_confidence(&skills), !skills.is_empty()),
    );
    field_scores.insert(
        "experience".to_string(),
        FieldScore::new(entries_confidence(&experience), !experience.is_empty()),
    );
    field_scores.insert(
        "education".to_string(),
        FieldScore::new(entries_confidence(&education), !education.is_empty()),
    );
    field_scores.insert(
        "projects".to_string(),
        FieldScore::new(entries_confidence(&projects), !projects.is_empty()),
    );
    let confidence_scores = aggregate(&field_scores);

    let [full_name, email, phone, location, linkedin, website] =
        scalar_fields.map(|(_, field)| field.value);

    ExtractionResult {
        full_name,
        email,
        phone,
        location,
        linkedin,
        website,
        experience: experience
            .into_iter()
            .filter_map(|e| match e {
                ExtractedEntry::Experience(x) => Some(x),
                _ => None,
            })
            .collect::<Vec<ExperienceEntry>>(),
        education: education
            .into_iter()
            .filter_map(|e| match e {
                ExtractedEntry::Education(x) => Some(x),
                _ => None,
            })
            .collect::<Vec<EducationEntry>>(),
        skills,
        projects: projects
            .into_iter()
            .filter_map(|e| match e {
                ExtractedEntry::Project(x) => Some(x),
                _ => None,
            })
            .collect::<Vec<ProjectEntry>>(),
        confidence_scores,
    }
}
