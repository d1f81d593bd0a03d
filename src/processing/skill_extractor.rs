//! Vocabulary-based skill extraction from free text

use crate::error::{CareerMatchError, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;

/// Technology names recognised in resume text. Extraction results follow this order.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Languages
    "JavaScript", "TypeScript", "Python", "Java", "C#", "C++", "Ruby", "PHP", "Go", "Swift",
    "Kotlin", "Rust",
    // Frameworks
    "React", "Angular", "Vue", "Vue.js", "Node.js", "Express", "Django", "Flask", "Spring",
    "Spring Boot", "ASP.NET", "Ruby on Rails", "Redux", "GraphQL", "REST APIs",
    // Front end
    "HTML", "CSS", "SCSS", "Sass", "Bootstrap", "Tailwind", "Tailwind CSS", "Material UI", "jQuery",
    // Data stores
    "SQL", "NoSQL", "MongoDB", "PostgreSQL", "MySQL", "SQLite", "Oracle", "Redis", "Firebase",
    // Cloud and delivery
    "AWS", "Azure", "Google Cloud", "GCP", "Docker", "Kubernetes", "Jenkins", "CircleCI",
    "GitLab CI", "CI/CD", "DevOps", "Microservices", "Linux", "Windows", "macOS",
    // Version control
    "Git", "GitHub", "BitBucket", "SVN", "Mercurial",
    // Process
    "Agile", "Scrum", "Kanban", "Jira", "Confluence", "Trello", "Project Management",
    // Data and ML
    "TensorFlow", "PyTorch", "scikit-learn", "Pandas", "NumPy", "R", "Data Analysis",
    "Machine Learning", "AI",
    // Mobile
    "iOS", "Android", "React Native", "Flutter", "Mobile Development",
];

/// Finds vocabulary terms in text as case-insensitive whole words.
pub struct SkillExtractor {
    matcher: AhoCorasick,
    vocabulary: Vec<String>,
}

impl SkillExtractor {
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(SKILL_VOCABULARY.iter().map(|s| s.to_string()).collect())
    }

    /// Build an extractor over a custom vocabulary.
    pub fn with_vocabulary(vocabulary: Vec<String>) -> Result<Self> {
        // Standard semantics so overlapping terms ("React" / "React Native") all report
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&vocabulary)
            .map_err(|e| CareerMatchError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { matcher, vocabulary })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Vocabulary terms present in `text`, in vocabulary order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut found = vec![false; self.vocabulary.len()];

        for mat in self.matcher.find_overlapping_iter(text) {
            let id = mat.pattern().as_usize();
            if !found[id] && is_whole_word(text, mat.start(), mat.end()) {
                found[id] = true;
            }
        }

        let skills: Vec<String> = self
            .vocabulary
            .iter()
            .zip(found)
            .filter_map(|(term, hit)| hit.then(|| term.clone()))
            .collect();

        debug!("Extracted {} vocabulary skills from {} bytes of text", skills.len(), text.len());
        skills
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
