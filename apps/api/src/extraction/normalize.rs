//! Text Normalizer: turns raw decoder output into clean line-oriented text.
//!
//! Total pure function. Letter case and punctuation are left alone; the
//! extractors do their own case-insensitive matching.

/// An ordered sequence of cleaned lines. No line carries control characters
/// or edge whitespace; consecutive blank lines are collapsed to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    lines: Vec<String>,
}

impl NormalizedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when the document decoded to nothing usable.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    #[cfg(test)]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

pub fn normalize(text: &str) -> NormalizedText {
    let mut lines: Vec<String> = Vec::new();
    let mut prev_blank = false;

    for raw in text.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let cleaned: String = raw
            .chars()
            .map(|c| if c == '\t' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        let line = cleaned.trim().to_string();

        if line.is_empty() {
            // Collapse blank runs; drop leading blanks entirely.
            if !prev_blank && !lines.is_empty() {
                lines.push(String::new());
                prev_blank = true;
            }
            continue;
        }

        // Rejoin hyphenation breaks left by PDF extraction: "exper-" + "ience".
        let breaks_word = !prev_blank
            && lines
                .last()
                .is_some_and(|prev| prev.len() > 1 && prev.ends_with('-'))
            && line.chars().next().is_some_and(|c| c.is_lowercase());
        if breaks_word {
            if let Some(prev) = lines.last_mut() {
                prev.pop();
                prev.push_str(&line);
                continue;
            }
        }

        lines.push(line);
        prev_blank = false;
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    NormalizedText { lines }
}
