//! Scalar field extractors: name, email, phone, location, linkedin, website.
//!
//! Each extractor is a pure function over the shared section list and never
//! fails: a missing field comes back as `ExtractedField::absent()`. All
//! extractors prefer the header section; email, phone, and linkedin fall
//! back to scanning the whole document.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extraction::models::ExtractedField;
use crate::extraction::segmenter::{DocumentSection, SectionKind};

lazy_static! {
    pub(crate) static ref EMAIL_RE: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}\b").expect("static regex");
    static ref PHONE_RE: Regex =
        Regex::new(r"\+?\d[\d\s().\-]{5,18}\d").expect("static regex");
    static ref YEAR_RANGE_RE: Regex =
        Regex::new(r"^(19|20)\d{2}\s*[-–—]\s*(19|20)\d{2}$").expect("static regex");
    pub(crate) static ref URL_RE: Regex = Regex::new(
        r"(?i)\b(?:https?://|www\.)?[a-z0-9][a-z0-9\-]*(?:\.[a-z0-9\-]+)+(?:/[^\s,;]*)?"
    )
    .expect("static regex");
    static ref LINKEDIN_RE: Regex =
        Regex::new(r"(?i)linkedin\.com/in/([A-Za-z0-9_\-]+)").expect("static regex");
    static ref LOCATION_RE: Regex = Regex::new(
        r"([A-Z][A-Za-z.\-]+(?:\s+[A-Z][A-Za-z.\-]+)*),\s*([A-Z]{2}\b|[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)"
    )
    .expect("static regex");
    static ref ZIP_RE: Regex = Regex::new(r"\b\d{5}\b").expect("static regex");
}

const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// TLDs accepted for bare (scheme-less) website candidates. Keeps "Node.js"
/// and friends out of the website field.
const KNOWN_TLDS: &[&str] = &[
    "com", "org", "net", "io", "dev", "me", "ai", "app", "co", "edu", "gov", "in", "uk", "ca",
    "de", "fr", "tech", "xyz",
];

pub(crate) fn sections_of<'a>(
    sections: &'a [DocumentSection],
    kind: SectionKind,
) -> impl Iterator<Item = &'a DocumentSection> {
    sections.iter().filter(move |s| s.kind == kind)
}

/// Header body lines, or the first lines of the document when no header
/// section exists (a heading-less document is one big section).
fn header_lines(sections: &[DocumentSection]) -> Vec<&str> {
    let lines: Vec<&str> = sections_of(sections, SectionKind::Header)
        .flat_map(|s| s.body().iter().map(String::as_str))
        .collect();
    if !lines.is_empty() {
        return lines;
    }
    sections
        .iter()
        .flat_map(|s| s.lines().iter().map(String::as_str))
        .take(10)
        .collect()
}

fn all_lines(sections: &[DocumentSection]) -> impl Iterator<Item = &str> {
    sections.iter().flat_map(|s| s.lines().iter().map(String::as_str))
}

/// True for lines carrying contact info rather than a name: emails, phones,
/// URLs, ZIP codes.
fn is_contact_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    line.contains('@')
        || EMAIL_RE.is_match(line)
        || find_phone_in(line).is_some()
        || lower.contains("linkedin")
        || lower.contains("github")
        || lower.contains("http")
        || lower.contains("www.")
        || ZIP_RE.is_match(line)
}

// ── Name ────────────────────────────────────────────────────────────────

/// Scans the first few non-blank header lines for a plausible name: 1-4
/// capitalized tokens of letters plus hyphen/apostrophe/period. Confidence
/// starts at 0.9 for the first candidate line and decays for later ones.
/// When no line qualifies, a name rebuilt from the email local part serves
/// as a low-confidence fallback.
pub fn extract_name(sections: &[DocumentSection]) -> ExtractedField {
    let candidates: Vec<&str> = header_lines(sections)
        .into_iter()
        .filter(|l| !l.is_empty())
        .take(5)
        .collect();

    for (i, line) in candidates.iter().enumerate() {
        if is_contact_line(line) || line.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        if !looks_like_name(line) {
            continue;
        }
        let confidence = (0.9 - 0.15 * i as f64).max(0.4);
        return ExtractedField::found(*line, confidence);
    }
    name_from_email(sections)
}

/// "jane.doe" -> "Jane Doe". Generic mailboxes (info@, noreply@) never
/// qualify, and purely numeric or very long local parts yield nothing.
fn name_from_email(sections: &[DocumentSection]) -> ExtractedField {
    let email = extract_email(sections);
    if !email.is_present() {
        return ExtractedField::absent();
    }
    let local = email.value.split('@').next().unwrap_or_default();
    let generic = ["noreply", "no-reply", "support", "info", "admin", "contact", "hello"];
    if generic.iter().any(|g| local.contains(g)) {
        return ExtractedField::absent();
    }
    let tokens: Vec<String> = local
        .split(['.', '_', '-'])
        .filter(|t| t.len() >= 2 && t.chars().all(|c| c.is_ascii_alphabetic()))
        .map(capitalize)
        .collect();
    if tokens.is_empty() || tokens.len() > 3 {
        return ExtractedField::absent();
    }
    ExtractedField::found(tokens.join(" "), 0.3)
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() || words.len() > 4 {
        return false;
    }
    words.iter().all(|w| {
        let first_upper = w.chars().next().is_some_and(|c| c.is_uppercase());
        let clean = w
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | '.'));
        // Accept initials like "J." but not stray single letters.
        let long_enough = w.chars().count() >= 2;
        first_upper && clean && long_enough
    })
}

// ── Email ───────────────────────────────────────────────────────────────

/// First syntactically valid email wins, preferring the header and skipping
/// obviously non-personal addresses when a better candidate exists.
pub fn extract_email(sections: &[DocumentSection]) -> ExtractedField {
    let header: Vec<&str> = header_lines(sections);
    let mut candidates: Vec<String> = Vec::new();
    for line in header.iter().copied().chain(all_lines(sections)) {
        for m in EMAIL_RE.find_iter(line) {
            candidates.push(m.as_str().to_lowercase());
        }
    }
    if candidates.is_empty() {
        return ExtractedField::absent();
    }
    let personal = candidates.iter().find(|e| {
        !["noreply", "no-reply", "support@", "info@", "example"]
            .iter()
            .any(|skip| e.contains(skip))
    });
    let email = personal.unwrap_or(&candidates[0]);
    ExtractedField::found(email.clone(), 1.0)
}

// ── Phone ───────────────────────────────────────────────────────────────

/// Separator-tolerant phone match requiring 7-15 digits. An international
/// `+` prefix scores higher than a bare local-looking number, which is more
/// likely a false positive.
pub fn extract_phone(sections: &[DocumentSection]) -> ExtractedField {
    let header = header_lines(sections);
    for line in header.iter().copied().chain(all_lines(sections)) {
        if let Some(candidate) = find_phone_in(line) {
            let confidence = if candidate.starts_with('+') { 0.9 } else { 0.6 };
            return ExtractedField::found(candidate, confidence);
        }
    }
    ExtractedField::absent()
}

fn find_phone_in(line: &str) -> Option<String> {
    for m in PHONE_RE.find_iter(line) {
        let candidate = m.as_str().trim();
        let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
        if !(7..=15).contains(&digits) {
            continue;
        }
        // "2020 - 2024" style year ranges satisfy the digit count; reject.
        if YEAR_RANGE_RE.is_match(candidate) {
            continue;
        }
        return Some(candidate.to_string());
    }
    None
}

// ── Location ────────────────────────────────────────────────────────────

/// A short "City, ST" (validated against US state abbreviations) or
/// "City, Country" span within a line. Shared with the entry parser so job
/// locations follow the same shape rule.
pub(crate) fn location_like(line: &str) -> Option<String> {
    let caps = LOCATION_RE.captures(line)?;
    let whole = caps.get(0)?.as_str();
    let region = caps.get(2)?.as_str();
    if whole.len() >= 40 {
        return None;
    }
    if region.len() == 2 && !US_STATES.contains(&region) {
        return None;
    }
    Some(whole.to_string())
}

/// "City, ST" or "City, Country" near the header. Free-text addresses are
/// ambiguous, so confidence stays below email/phone.
pub fn extract_location(sections: &[DocumentSection]) -> ExtractedField {
    for line in header_lines(sections).into_iter().take(15) {
        if line.contains('@') {
            continue;
        }
        if let Some(found) = location_like(line) {
            return ExtractedField::found(found, 0.7);
        }
    }
    ExtractedField::absent()
}

// ── Links ───────────────────────────────────────────────────────────────

pub fn extract_linkedin(sections: &[DocumentSection]) -> ExtractedField {
    for line in all_lines(sections) {
        if let Some(caps) = LINKEDIN_RE.captures(line) {
            let slug = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            return ExtractedField::found(format!("linkedin.com/in/{slug}"), 0.9);
        }
    }
    ExtractedField::absent()
}

/// Any non-LinkedIn URL near the header. Bare domains must end in a known
/// TLD; anything with an explicit scheme or `www.` is accepted as-is.
pub fn extract_website(sections: &[DocumentSection]) -> ExtractedField {
    let header: Vec<&str> = header_lines(sections);
    let summary: Vec<&str> = sections_of(sections, SectionKind::Summary)
        .flat_map(|s| s.body().iter().map(String::as_str))
        .collect();

    for line in header.into_iter().chain(summary) {
        // Mask emails so "jane@example.com" never yields "example.com".
        let masked = EMAIL_RE.replace_all(line, " ");
        for m in URL_RE.find_iter(&masked) {
            let url = m.as_str().trim_end_matches(['.', ',']);
            let lower = url.to_lowercase();
            if lower.contains("linkedin.com") {
                continue;
            }
            let explicit = lower.starts_with("http") || lower.starts_with("www.");
            if explicit || has_known_tld(&lower) {
                return ExtractedField::found(url, 0.7);
            }
        }
    }
    ExtractedField::absent()
}

fn has_known_tld(url: &str) -> bool {
    let host = url.split('/').next().unwrap_or(url);
    host.rsplit('.')
        .next()
        .is_some_and(|tld| KNOWN_TLDS.contains(&tld))
}
