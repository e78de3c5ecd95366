//! Entry extractors: reconstructs structured experience, education, and
//! project records from the multi-line blocks of their sections.
//!
//! Blocks split on blank lines. The first line of a block carries the
//! headline ("Title at Employer" or "Employer - Title") plus, usually, a
//! date range; remaining lines become the description with bullet markers
//! stripped. Malformed blocks never fail, they just come back with empty
//! sub-fields.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extraction::fields::{location_like, sections_of, URL_RE};
use crate::extraction::models::{
    EducationEntry, ExperienceEntry, ExtractedEntry, ProjectEntry,
};
use crate::extraction::segmenter::{DocumentSection, SectionKind};
use crate::extraction::skills::strip_bullet;

const MONTHS: &str = "(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\\.?";

lazy_static! {
    /// Date-range pattern table, tried in order. Supporting another format
    /// means adding a row, not another special case.
    static ref DATE_RANGE_PATTERNS: Vec<Regex> = vec![
        // 01/2020 - 12/2022, 01/2020 – present
        Regex::new(r"(?i)\b(?P<start>\d{1,2}/\d{4})\s*(?:-|–|—|to)\s*(?P<end>\d{1,2}/\d{4}|present|current)\b")
            .expect("static regex"),
        // Jan 2020 - Present, September 2018 to May 2022
        Regex::new(&format!(
            r"(?i)\b(?P<start>{MONTHS}\s+\d{{4}})\s*(?:-|–|—|to)\s*(?P<end>{MONTHS}\s+\d{{4}}|present|current)\b"
        ))
        .expect("static regex"),
        // 2019 - 2023, 2021 – present
        Regex::new(r"(?i)\b(?P<start>(?:19|20)\d{2})\s*(?:-|–|—|to)\s*(?P<end>(?:19|20)\d{2}|present|current)\b")
            .expect("static regex"),
    ];
    static ref GPA_RE: Regex =
        Regex::new(r"(?i)\bgpa\s*[:\-]?\s*([0-4](?:\.\d{1,2})?)").expect("static regex");
    static ref TECH_PREFIX_RE: Regex =
        Regex::new(r"(?i)^(?:technologies|tech stack|stack|built with|tools)\s*[:\-]\s*")
            .expect("static regex");
    static ref INSTITUTION_HINT_RE: Regex =
        Regex::new(r"(?i)\b(university|college|institute|school|academy|polytechnic)\b")
            .expect("static regex");
}

#[derive(Debug, Default)]
struct DateRange {
    start: String,
    end: String,
}

/// Finds the first date range in a line; returns the range and the line with
/// the matched span (plus any emptied brackets) removed.
fn take_date_range(line: &str) -> (Option<DateRange>, String) {
    for pattern in DATE_RANGE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(line) {
            let Some(whole) = caps.get(0) else { continue };
            let start = caps.name("start").map(|m| m.as_str().to_string());
            let end = caps
                .name("end")
                .map(|m| normalize_end(m.as_str()))
                .unwrap_or_default();
            let mut rest = String::with_capacity(line.len());
            rest.push_str(&line[..whole.start()]);
            rest.push_str(&line[whole.end()..]);
            return (
                Some(DateRange {
                    start: start.unwrap_or_default(),
                    end,
                }),
                clean_headline(&rest),
            );
        }
    }
    (None, clean_headline(line))
}

fn normalize_end(end: &str) -> String {
    let lower = end.to_lowercase();
    if lower == "present" || lower == "current" {
        "present".to_string()
    } else {
        end.to_string()
    }
}

/// Removes brackets emptied by date removal and dangling separators.
fn clean_headline(line: &str) -> String {
    line.replace("()", "")
        .replace("[]", "")
        .replace("( )", "")
        .trim()
        .trim_end_matches(['-', '–', '—', '|', ',', ';'])
        .trim()
        .to_string()
}

/// Splits a headline into its two halves: "Title at Employer" first, then
/// "Employer - Title" (dash, en dash, em dash, or pipe). Returns None when
/// neither shape yields two non-empty tokens.
fn split_headline(headline: &str) -> Option<(String, String, HeadlineOrder)> {
    if let Some((left, right)) = headline.split_once(" at ") {
        let (l, r) = (left.trim(), right.trim());
        if !l.is_empty() && !r.is_empty() {
            return Some((l.to_string(), r.to_string(), HeadlineOrder::TitleFirst));
        }
    }
    for sep in [" — ", " – ", " - ", " | "] {
        if let Some((left, right)) = headline.split_once(sep) {
            let (l, r) = (left.trim(), right.trim());
            if !l.is_empty() && !r.is_empty() {
                return Some((l.to_string(), r.to_string(), HeadlineOrder::EmployerFirst));
            }
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HeadlineOrder {
    TitleFirst,
    EmployerFirst,
}

/// Groups a section body into entry blocks separated by blank lines.
fn blocks(sections: &[DocumentSection], kind: SectionKind) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    for section in sections_of(sections, kind) {
        let mut current: Vec<String> = Vec::new();
        for line in section.body() {
            if line.is_empty() {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            } else {
                current.push(line.clone());
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

fn description_of(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| strip_bullet(l))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Experience ──────────────────────────────────────────────────────────

pub fn extract_experience(sections: &[DocumentSection]) -> Vec<ExtractedEntry> {
    blocks(sections, SectionKind::Experience)
        .iter()
        .map(|block| ExtractedEntry::Experience(parse_experience_block(block)))
        .collect()
}

fn parse_experience_block(block: &[String]) -> ExperienceEntry {
    let mut entry = ExperienceEntry::default();
    let (dates, headline) = take_date_range(&block[0]);
    let mut rest = &block[1..];

    match split_headline(&headline) {
        Some((left, right, HeadlineOrder::TitleFirst)) => {
            entry.job_title = left;
            entry.employer = right;
        }
        Some((left, right, HeadlineOrder::EmployerFirst)) => {
            entry.employer = left;
            entry.job_title = right;
        }
        None => entry.job_title = headline,
    }

    let dates = match dates {
        Some(d) => Some(d),
        // Dates often sit on their own second line.
        None => match rest.first().map(|l| take_date_range(l)) {
            Some((Some(d), leftover)) if leftover.is_empty() => {
                rest = &rest[1..];
                Some(d)
            }
            _ => None,
        },
    };
    if let Some(d) = dates {
        entry.start_date = d.start;
        entry.end_date = d.end;
    }

    // A second line that is exactly a "City, ST"-shaped span is the job
    // location; anything looser is description text.
    if let Some(first) = rest.first() {
        if location_like(first).is_some_and(|loc| loc == *first) {
            entry.location = first.clone();
            rest = &rest[1..];
        }
    }

    entry.description = description_of(rest);
    entry
}

// ── Education ───────────────────────────────────────────────────────────

pub fn extract_education(sections: &[DocumentSection]) -> Vec<ExtractedEntry> {
    blocks(sections, SectionKind::Education)
        .iter()
        .map(|block| ExtractedEntry::Education(parse_education_block(block)))
        .collect()
}

fn parse_education_block(block: &[String]) -> EducationEntry {
    let mut entry = EducationEntry::default();
    let (dates, headline) = take_date_range(&block[0]);

    match split_headline(&headline) {
        Some((left, right, order)) => {
            // Whichever half names an institution wins that slot; otherwise
            // fall back to the headline order ("Degree at Institution" vs
            // "Institution - Degree").
            let left_is_institution = match (
                INSTITUTION_HINT_RE.is_match(&left),
                INSTITUTION_HINT_RE.is_match(&right),
            ) {
                (true, false) => true,
                (false, true) => false,
                _ => order == HeadlineOrder::EmployerFirst,
            };
            if left_is_institution {
                entry.institution = left;
                entry.degree = right;
            } else {
                entry.degree = left;
                entry.institution = right;
            }
        }
        None => entry.institution = headline,
    }

    // "BS in Computer Science" carries the field of study.
    let degree_split = entry
        .degree
        .split_once(" in ")
        .map(|(d, f)| (d.trim().to_string(), f.trim().to_string()));
    if let Some((degree, field)) = degree_split {
        entry.degree = degree;
        entry.field_of_study = field;
    }

    if let Some(d) = dates {
        entry.start_date = d.start;
        entry.end_date = d.end;
    }

    let mut description_lines: Vec<String> = Vec::new();
    for line in &block[1..] {
        if entry.gpa.is_empty() {
            if let Some(caps) = GPA_RE.captures(line) {
                entry.gpa = caps
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                // A line that is only the GPA is consumed entirely.
                if GPA_RE.replace(line, "").trim().is_empty() {
                    continue;
                }
            }
        }
        if entry.start_date.is_empty() && entry.end_date.is_empty() {
            let (dates, leftover) = take_date_range(line);
            if let Some(d) = dates {
                entry.start_date = d.start;
                entry.end_date = d.end;
                if leftover.is_empty() {
                    continue;
                }
            }
        }
        description_lines.push(line.clone());
    }
    entry.description = description_of(&description_lines);
    entry
}

// ── Projects ────────────────────────────────────────────────────────────

pub fn extract_projects(sections: &[DocumentSection]) -> Vec<ExtractedEntry> {
    blocks(sections, SectionKind::Projects)
        .iter()
        .map(|block| ExtractedEntry::Project(parse_project_block(block)))
        .collect()
}

fn parse_project_block(block: &[String]) -> ProjectEntry {
    let mut entry = ProjectEntry::default();
    let (_dates, headline) = take_date_range(&block[0]);
    entry.title = headline;

    let mut description_lines: Vec<String> = Vec::new();
    for line in &block[1..] {
        if entry.technologies.is_empty() {
            if let Some(m) = TECH_PREFIX_RE.find(line) {
                entry.technologies = line[m.end()..].trim().to_string();
                continue;
            }
        }
        if entry.link.is_empty() {
            if let Some(m) = URL_RE.find(line) {
                let url = m.as_str().trim_end_matches(['.', ',']);
                if url.contains("://") || url.starts_with("www.") || url.contains(".com")
                    || url.contains(".io") || url.contains(".dev")
                {
                    entry.link = url.to_string();
                    if strip_bullet(line).trim() == m.as_str() {
                        continue;
                    }
                }
            }
        }
        description_lines.push(line.clone());
    }
    entry.description = description_of(&description_lines);
    entry
}
