//! Job listing records and their categorical fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// One job record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub preferred_role: String,
    /// Lowercased, trimmed, deduplicated skill tokens.
    pub skills: Vec<String>,
    pub years_experience: f64,
    pub current_salary: f64,
    pub education_level: EducationLevel,
    pub has_certifications: bool,
    pub location_preference: LocationPreference,
    pub state_code: Option<String>,
}

impl Listing {
    pub fn has_skills(&self) -> bool {
        !self.skills.is_empty()
    }
}

/// Split a comma-separated skill field into normalized tokens.
pub fn parse_skill_field(raw: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for token in raw.split(',') {
        let token = token.trim().to_lowercase();
        if !token.is_empty() && !skills.contains(&token) {
            skills.push(token);
        }
    }
    skills
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "Associate's")]
    Associate,
    #[default]
    #[serde(rename = "Bachelor's")]
    Bachelor,
    #[serde(rename = "Master's")]
    Master,
    #[serde(rename = "PhD")]
    Phd,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 5] = [
        EducationLevel::HighSchool,
        EducationLevel::Associate,
        EducationLevel::Bachelor,
        EducationLevel::Master,
        EducationLevel::Phd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Associate => "Associate's",
            EducationLevel::Bachelor => "Bachelor's",
            EducationLevel::Master => "Master's",
            EducationLevel::Phd => "PhD",
        }
    }

    /// Exact match against the five canonical labels.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|level| level.as_str() == raw)
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationPreference {
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl LocationPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationPreference::Remote => "Remote",
            LocationPreference::Hybrid => "Hybrid",
            LocationPreference::OnSite => "On-site",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "remote" => Some(LocationPreference::Remote),
            "hybrid" => Some(LocationPreference::Hybrid),
            "onsite" => Some(LocationPreference::OnSite),
            _ => None,
        }
    }
}

impl fmt::Display for LocationPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
