//! Skills extraction: tokenizes the skills section and attaches categories
//! from a known-skill lexicon.

use std::collections::HashSet;

use crate::extraction::fields::sections_of;
use crate::extraction::models::Skill;
use crate::extraction::segmenter::{DocumentSection, SectionKind};

/// Sentence fragments are not skills; anything longer than this is dropped.
const MAX_SKILL_LEN: usize = 40;

const PROGRAMMING: &[&str] = &[
    "python", "javascript", "typescript", "java", "c++", "c#", "c", "ruby", "go", "golang",
    "rust", "php", "swift", "kotlin", "scala", "r", "matlab", "perl", "dart", "haskell",
    "elixir", "clojure",
];

const WEB: &[&str] = &[
    "html", "html5", "css", "css3", "sass", "tailwind", "bootstrap", "react", "reactjs",
    "react.js", "angular", "vue", "vuejs", "vue.js", "svelte", "next.js", "nextjs", "jquery",
    "redux", "node", "node.js", "nodejs", "express", "django", "flask", "fastapi", "spring",
    "spring boot", "rails", "laravel", "graphql", "rest",
];

const DATABASE: &[&str] = &[
    "sql", "mysql", "postgresql", "postgres", "mongodb", "redis", "elasticsearch", "sqlite",
    "dynamodb", "cassandra", "firebase", "supabase", "oracle",
];

const CLOUD: &[&str] = &[
    "aws", "azure", "gcp", "google cloud", "docker", "kubernetes", "k8s", "terraform",
    "ansible", "jenkins", "github actions", "ci/cd", "devops", "nginx", "linux", "bash",
];

const DATA_SCIENCE: &[&str] = &[
    "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "keras", "machine learning",
    "deep learning", "nlp", "computer vision", "data analysis", "data science", "jupyter",
    "matplotlib", "tableau", "power bi",
];

const SOFT: &[&str] = &[
    "leadership", "communication", "teamwork", "mentoring", "mentorship", "management",
    "problem solving", "collaboration", "public speaking", "agile", "scrum",
];

/// Splits the skills section on commas, bullets, and newlines; trims,
/// drops empties and overlong fragments, and deduplicates case-insensitively
/// while preserving first-seen casing.
pub fn extract_skills(sections: &[DocumentSection]) -> Vec<Skill> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut skills = Vec::new();

    for section in sections_of(sections, SectionKind::Skills) {
        for line in section.body() {
            let line = strip_bullet(line);
            for token in line.split([',', ';', '•', '|']) {
                let name = token.trim().trim_end_matches('.').trim();
                if name.is_empty() || name.chars().count() > MAX_SKILL_LEN {
                    continue;
                }
                let key = name.to_lowercase();
                if !seen.insert(key.clone()) {
                    continue;
                }
                skills.push(Skill {
                    name: name.to_string(),
                    category: categorize(&key),
                });
            }
        }
    }

    skills
}

pub(crate) fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(['-', '•', '*', '–', '▪'])
        .trim_start()
}

fn categorize(name: &str) -> Option<String> {
    let table: [(&[&str], &str); 6] = [
        (PROGRAMMING, "Programming"),
        (WEB, "Web"),
        (DATABASE, "Database"),
        (CLOUD, "Cloud & DevOps"),
        (DATA_SCIENCE, "Data Science"),
        (SOFT, "Soft Skill"),
    ];
    for (known, category) in table {
        if known.contains(&name) {
            return Some(category.to_string());
        }
    }
    None
}
