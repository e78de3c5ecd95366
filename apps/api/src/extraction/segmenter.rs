//! Section Segmenter: splits normalized text into labeled, contiguous blocks.
//!
//! A line is a heading when it matches a lexicon keyword (case-insensitive,
//! punctuation trimmed), is short (under six words), and is either the first
//! non-blank line or immediately preceded by a blank line. The heading line
//! stays inside its own section's span so the sections partition the text
//! exactly; `body()` is what excludes it from extraction.

use serde::{Deserialize, Serialize};

use crate::extraction::normalize::NormalizedText;

const MAX_HEADING_WORDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Other,
}

/// A labeled contiguous span of normalized lines. `start..end` are line
/// indices into the normalized text; the owned `lines` include the heading
/// line when present.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSection {
    pub kind: SectionKind,
    pub start: usize,
    pub end: usize,
    has_heading: bool,
    lines: Vec<String>,
}

impl DocumentSection {
    /// All lines in the span, heading included. Concatenating `lines()` over
    /// every section in order reconstructs the normalized text exactly.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Body lines: the span minus the heading line itself.
    pub fn body(&self) -> &[String] {
        if self.has_heading {
            &self.lines[1..]
        } else {
            &self.lines
        }
    }

    pub fn heading(&self) -> Option<&str> {
        if self.has_heading {
            self.lines.first().map(String::as_str)
        } else {
            None
        }
    }
}

/// Heading keyword lists, one per recognizable section kind. Data, not code:
/// deployments can swap in a per-locale file via HEADING_LEXICON_PATH without
/// touching extractor logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingLexicon {
    pub summary: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
}

impl Default for HeadingLexicon {
    fn default() -> Self {
        let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            summary: list(&[
                "summary",
                "professional summary",
                "profile",
                "objective",
                "about me",
            ]),
            experience: list(&[
                "experience",
                "work experience",
                "work history",
                "employment",
                "employment history",
                "professional experience",
            ]),
            education: list(&[
                "education",
                "academic background",
                "academics",
                "qualifications",
            ]),
            skills: list(&[
                "skills",
                "technical skills",
                "core competencies",
                "technologies",
                "tech stack",
            ]),
            projects: list(&[
                "projects",
                "personal projects",
                "selected projects",
                "research projects",
            ]),
        }
    }
}

impl HeadingLexicon {
    pub fn from_json_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Classifies a candidate heading line. Overlapping keyword matches
    /// resolve by fixed priority: summary > experience > education > skills
    /// > projects, so behavior is deterministic.
    pub fn classify(&self, line: &str) -> Option<SectionKind> {
        let needle = normalize_heading(line);
        if needle.is_empty() {
            return None;
        }
        let ordered: [(&[String], SectionKind); 5] = [
            (&self.summary, SectionKind::Summary),
            (&self.experience, SectionKind::Experience),
            (&self.education, SectionKind::Education),
            (&self.skills, SectionKind::Skills),
            (&self.projects, SectionKind::Projects),
        ];
        for (keywords, kind) in ordered {
            if keywords.iter().any(|k| normalize_heading(k) == needle) {
                return Some(kind);
            }
        }
        None
    }
}

/// Lowercases and strips everything but letters, digits, and single interior
/// spaces, so "TECHNICAL SKILLS:" and "technical skills" compare equal.
fn normalize_heading(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut prev_space = true;
    for c in line.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            prev_space = false;
        } else if !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim_end().to_string()
}

/// Scans top to bottom maintaining a current section kind, initialized to
/// `header`: the block before any recognized heading is assumed to hold
/// name/contact info.
pub fn segment(text: &NormalizedText, lexicon: &HeadingLexicon) -> Vec<DocumentSection> {
    let lines = text.lines();
    let mut sections = Vec::new();

    let mut current_kind = SectionKind::Header;
    let mut current_start = 0usize;
    let mut current_has_heading = false;
    let mut seen_nonblank = false;

    for (i, line) in lines.iter().enumerate() {
        let prev_blank = i == 0 || lines[i - 1].is_empty();
        let heading_kind = if !line.is_empty()
            && (prev_blank || !seen_nonblank)
            && line.split_whitespace().count() < MAX_HEADING_WORDS
        {
            lexicon.classify(line)
        } else {
            None
        };

        if let Some(kind) = heading_kind {
            if i > current_start {
                sections.push(DocumentSection {
                    kind: current_kind,
                    start: current_start,
                    end: i,
                    has_heading: current_has_heading,
                    lines: lines[current_start..i].to_vec(),
                });
            }
            current_kind = kind;
            current_start = i;
            current_has_heading = true;
        }

        if !line.is_empty() {
            seen_nonblank = true;
        }
    }

    if current_start < lines.len() {
        sections.push(DocumentSection {
            kind: current_kind,
            start: current_start,
            end: lines.len(),
            has_heading: current_has_heading,
            lines: lines[current_start..].to_vec(),
        });
    }

    // A document with no recognized headings still splits once: the contact
    // block above the first blank line stays the header, the remainder is an
    // unlabeled section.
    if sections.len() == 1 && !sections[0].has_heading {
        if let Some(blank) = lines.iter().position(|l| l.is_empty()) {
            if blank + 1 < lines.len() {
                return vec![
                    DocumentSection {
                        kind: SectionKind::Header,
                        start: 0,
                        end: blank + 1,
                        has_heading: false,
                        lines: lines[..blank + 1].to_vec(),
                    },
                    DocumentSection {
                        kind: SectionKind::Other,
                        start: blank + 1,
                        end: lines.len(),
                        has_heading: false,
                        lines: lines[blank + 1..].to_vec(),
                    },
                ];
            }
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::normalize::normalize;

    const FIXTURE: &str = "Jane Doe\njane@example.com\n\nSUMMARY\nBuilds things.\n\nEXPERIENCE\nSenior Engineer at Acme Corp (01/2020 - present)\nBuilt things.\n\nSKILLS\nPython, Go\n";

    fn kinds(sections: &[DocumentSection]) -> Vec<SectionKind> {
        sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_fixture_section_kinds_in_order() {
        let text = normalize(FIXTURE);
        let sections = segment(&text, &HeadingLexicon::default());
        assert_eq!(
            kinds(&sections),
            [
                SectionKind::Header,
                SectionKind::Summary,
                SectionKind::Experience,
                SectionKind::Skills,
            ]
        );
    }

    #[test]
    fn test_heading_excluded_from_body_but_kept_in_span() {
        let text = normalize(FIXTURE);
        let sections = segment(&text, &HeadingLexicon::default());
        let skills = &sections[3];
        assert_eq!(skills.heading(), Some("SKILLS"));
        assert_eq!(skills.body(), ["Python, Go"]);
        assert_eq!(skills.lines()[0], "SKILLS");
    }

    #[test]
    fn test_sections_partition_the_text_exactly() {
        let text = normalize(FIXTURE);
        let sections = segment(&text, &HeadingLexicon::default());
        let rebuilt: Vec<String> = sections.iter().flat_map(|s| s.lines().to_vec()).collect();
        assert_eq!(rebuilt.as_slice(), text.lines());
        for pair in sections.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "sections must be contiguous");
        }
        assert_eq!(sections[0].start, 0);
        assert_eq!(sections.last().unwrap().end, text.lines().len());
    }

    #[test]
    fn test_no_headings_yields_single_header_section() {
        let text = normalize("Jane Doe\njane@example.com\nSome prose.");
        let sections = segment(&text, &HeadingLexicon::default());
        assert_eq!(kinds(&sections), [SectionKind::Header]);
        assert_eq!(sections[0].heading(), None);
    }

    #[test]
    fn test_heading_as_first_line_opens_its_section_directly() {
        let text = normalize("EXPERIENCE\nAcme Corp - Engineer");
        let sections = segment(&text, &HeadingLexicon::default());
        assert_eq!(kinds(&sections), [SectionKind::Experience]);
        assert_eq!(sections[0].body(), ["Acme Corp - Engineer"]);
    }

    #[test]
    fn test_heading_requires_preceding_blank_line() {
        // "education" buried right under other text is body, not a heading.
        let text = normalize("Jane Doe\neducation\nmore text");
        let sections = segment(&text, &HeadingLexicon::default());
        assert_eq!(kinds(&sections), [SectionKind::Header]);
    }

    #[test]
    fn test_long_sentence_containing_keyword_is_not_a_heading() {
        let text =
            normalize("Jane Doe\n\nI have many years of experience working with teams and tools");
        let sections = segment(&text, &HeadingLexicon::default());
        assert_eq!(kinds(&sections), [SectionKind::Header, SectionKind::Other]);
        assert!(sections.iter().all(|s| s.heading().is_none()));
    }

    #[test]
    fn test_headingless_document_splits_header_and_other() {
        let text = normalize(
            "Jane Doe\njane@example.com\n\nTen years of consulting work.\nShipped many tools.",
        );
        let sections = segment(&text, &HeadingLexicon::default());
        assert_eq!(kinds(&sections), [SectionKind::Header, SectionKind::Other]);
        assert_eq!(sections[1].body(), ["Ten years of consulting work.", "Shipped many tools."]);
        let rebuilt: Vec<String> = sections.iter().flat_map(|s| s.lines().to_vec()).collect();
        assert_eq!(rebuilt.as_slice(), text.lines());
    }

    #[test]
    fn test_heading_matching_trims_punctuation_and_case() {
        let text = normalize("Jane Doe\n\nTECHNICAL SKILLS:\nRust");
        let sections = segment(&text, &HeadingLexicon::default());
        assert_eq!(kinds(&sections), [SectionKind::Header, SectionKind::Skills]);
    }

    #[test]
    fn test_repeated_headings_produce_repeated_sections() {
        let text = normalize("Jane\n\nEXPERIENCE\nJob A\n\nEXPERIENCE\nJob B");
        let sections = segment(&text, &HeadingLexicon::default());
        assert_eq!(
            kinds(&sections),
            [
                SectionKind::Header,
                SectionKind::Experience,
                SectionKind::Experience,
            ]
        );
    }

    #[test]
    fn test_classify_priority_is_fixed() {
        let mut lexicon = HeadingLexicon::default();
        // Force an overlap: the same keyword in two lists resolves to the
        // higher-priority kind.
        lexicon.skills.push("background".to_string());
        lexicon.education.push("background".to_string());
        assert_eq!(lexicon.classify("Background"), Some(SectionKind::Education));
    }

    #[test]
    fn test_lexicon_roundtrips_through_json() {
        let lexicon = HeadingLexicon::default();
        let json = serde_json::to_string(&lexicon).unwrap();
        let back: HeadingLexicon = serde_json::from_str(&json).unwrap();
        assert_eq!(back.classify("Work History"), Some(SectionKind::Experience));
    }

    #[test]
    fn test_empty_text_yields_no_sections() {
        let text = normalize("");
        assert!(segment(&text, &HeadingLexicon::default()).is_empty());
    }
}
