//! Confidence Aggregator: per-field score copy-through plus a deterministic
//! weighted-mean `overall`.
//!
//! Weights are fixed policy, documented here so the overall score is stable
//! across releases: identity fields (full_name, email) weigh 3, phone 2,
//! everything else 1. A field with no value is zero-weighted so a résumé
//! without, say, a website is not penalized for it.

use std::collections::BTreeMap;

use crate::extraction::models::{ExtractedEntry, Skill};

/// Weight table for the overall score. Order matters only for readability;
/// aggregation is commutative.
const FIELD_WEIGHTS: &[(&str, f64)] = &[
    ("full_name", 3.0),
    ("email", 3.0),
    ("phone", 2.0),
    ("location", 1.0),
    ("linkedin", 1.0),
    ("website", 1.0),
    ("skills", 1.0),
    ("experience", 1.0),
    ("education", 1.0),
    ("projects", 1.0),
];

/// One field's contribution to aggregation: its confidence and whether a
/// value was actually found (absent fields are zero-weighted, not averaged
/// in as zeros).
#[derive(Debug, Clone, Copy)]
pub struct FieldScore {
    pub confidence: f64,
    pub present: bool,
}

impl FieldScore {
    pub fn new(confidence: f64, present: bool) -> Self {
        Self {
            confidence: confidence.clamp(0.0, 1.0),
            present,
        }
    }
}

/// Copies each field's own confidence through under its field name and adds
/// the weighted-mean `overall`. Same input always yields the same output.
pub fn aggregate(fields: &BTreeMap<String, FieldScore>) -> BTreeMap<String, f64> {
    let mut scores: BTreeMap<String, f64> = fields
        .iter()
        .map(|(name, score)| (name.clone(), score.confidence))
        .collect();

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (name, weight) in FIELD_WEIGHTS {
        if let Some(score) = fields.get(*name) {
            if score.present {
                weighted_sum += weight * score.confidence;
                weight_total += weight;
            }
        }
    }

    let overall = if weight_total > 0.0 {
        (weighted_sum / weight_total).clamp(0.0, 1.0)
    } else {
        0.0
    };
    scores.insert("overall".to_string(), overall);
    scores
}

/// Skills-list confidence grows with the number of skills found, capped at
/// 0.9 (a long list is strong evidence the section was really a skills list).
pub fn skills_confidence(skills: &[Skill]) -> f64 {
    if skills.is_empty() {
        0.0
    } else {
        (0.15 * skills.len() as f64).min(0.9)
    }
}

/// Entry-list confidence: the mean completeness of the reconstructed entries.
/// Sub-field weights favor the headline halves over dates and description.
pub fn entries_confidence(entries: &[ExtractedEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let sum: f64 = entries.iter().map(entry_completeness).sum();
    (sum / entries.len() as f64).clamp(0.0, 1.0)
}

fn entry_completeness(entry: &ExtractedEntry) -> f64 {
    let filled = |s: &str| !s.is_empty();
    match entry {
        ExtractedEntry::Experience(e) => {
            let mut score = 0.0;
            if filled(&e.job_title) {
                score += 0.4;
            }
            if filled(&e.employer) {
                score += 0.3;
            }
            if filled(&e.start_date) || filled(&e.end_date) {
                score += 0.2;
            }
            if filled(&e.description) {
                score += 0.1;
            }
            score
        }
        ExtractedEntry::Education(e) => {
            let mut score = 0.0;
            if filled(&e.institution) {
                score += 0.4;
            }
            if filled(&e.degree) {
                score += 0.3;
            }
            if filled(&e.start_date) || filled(&e.end_date) {
                score += 0.2;
            }
            if filled(&e.field_of_study) || filled(&e.gpa) {
                score += 0.1;
            }
            score
        }
        ExtractedEntry::Project(e) => {
            let mut score = 0.0;
            if filled(&e.title) {
                score += 0.6;
            }
            if filled(&e.description) {
                score += 0.2;
            }
            if filled(&e.technologies) || filled(&e.link) {
                score += 0.2;
            }
            score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::models::{ExperienceEntry, ProjectEntry};

    fn fields(pairs: &[(&str, f64, bool)]) -> BTreeMap<String, FieldScore> {
        pairs
            .iter()
            .map(|(name, conf, present)| (name.to_string(), FieldScore::new(*conf, *present)))
            .collect()
    }

    #[test]
    fn test_overall_is_weighted_mean() {
        let scores = aggregate(&fields(&[
            ("full_name", 0.9, true),
            ("email", 1.0, true),
            ("location", 0.5, true),
        ]));
        // (3*0.9 + 3*1.0 + 1*0.5) / 7 = 6.2 / 7
        let expected = 6.2 / 7.0;
        assert!(
            (scores["overall"] - expected).abs() < 1e-9,
            "overall was {}",
            scores["overall"]
        );
    }

    #[test]
    fn test_absent_field_does_not_drag_down_overall() {
        let with_absent = aggregate(&fields(&[
            ("email", 1.0, true),
            ("website", 0.0, false),
        ]));
        assert_eq!(with_absent["overall"], 1.0);
    }

    #[test]
    fn test_per_field_scores_copied_through() {
        let scores = aggregate(&fields(&[("phone", 0.6, true)]));
        assert_eq!(scores["phone"], 0.6);
    }

    #[test]
    fn test_all_absent_yields_zero_overall() {
        let scores = aggregate(&fields(&[
            ("full_name", 0.0, false),
            ("email", 0.0, false),
        ]));
        assert_eq!(scores["overall"], 0.0);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let input = fields(&[("full_name", 0.9, true), ("skills", 0.45, true)]);
        assert_eq!(aggregate(&input), aggregate(&input));
    }

    #[test]
    fn test_overall_stays_in_bounds() {
        let scores = aggregate(&fields(&[
            ("full_name", 1.0, true),
            ("email", 1.0, true),
            ("phone", 1.0, true),
        ]));
        assert!(scores.values().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_skills_confidence_scales_and_caps() {
        let skill = |n: &str| Skill {
            name: n.to_string(),
            category: None,
        };
        assert_eq!(skills_confidence(&[]), 0.0);
        let three: Vec<Skill> = ["a", "b", "c"].iter().map(|n| skill(n)).collect();
        assert!((skills_confidence(&three) - 0.45).abs() < 1e-9);
        let many: Vec<Skill> = (0..20).map(|i| skill(&i.to_string())).collect();
        assert_eq!(skills_confidence(&many), 0.9);
    }

    #[test]
    fn test_full_experience_entry_scores_one() {
        let entry = ExtractedEntry::Experience(ExperienceEntry {
            job_title: "Engineer".into(),
            employer: "Acme".into(),
            location: String::new(),
            start_date: "2020".into(),
            end_date: "present".into(),
            description: "Built.".into(),
        });
        assert!((entries_confidence(&[entry]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bare_project_title_scores_partial() {
        let entry = ExtractedEntry::Project(ProjectEntry {
            title: "Tool".into(),
            ..Default::default()
        });
        let score = entries_confidence(&[entry]);
        assert!((score - 0.6).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_empty_entry_list_scores_zero() {
        assert_eq!(entries_confidence(&[]), 0.0);
    }
}
