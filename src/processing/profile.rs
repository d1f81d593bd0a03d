//! Candidate profile parsing and skill normalization

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `skills` field as callers send it: one comma-separated string or a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

impl SkillsInput {
    /// Canonical skill list: trimmed, blank entries dropped, deduplicated.
    pub fn normalize(&self) -> Vec<String> {
        let tokens: Box<dyn Iterator<Item = &str>> = match self {
            SkillsInput::Text(text) => Box::new(text.split(',')),
            SkillsInput::List(items) => Box::new(items.iter().map(String::as_str)),
        };
        dedup_skills(tokens)
    }
}

/// A candidate profile after parsing. Built once per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    /// Normalized skill list (`skills_list` in the request contract).
    pub skills: Vec<String>,
    pub experience: Option<f64>,
    pub target_role: Option<String>,
}

impl Profile {
    /// Parse a JSON profile document. Unparsable input yields an empty profile.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!("Could not parse profile JSON, continuing with an empty profile: {}", e);
                Self::default()
            }
        }
    }

    /// Read a profile from an already-decoded JSON value.
    ///
    /// Each field is read on its own, so one malformed field does not
    /// discard the rest of the profile.
    pub fn from_value(value: &Value) -> Self {
        // A JSON string holding a JSON object is accepted too
        if let Value::String(inner) = value {
            return Self::from_json(inner);
        }

        let Some(object) = value.as_object() else {
            warn!("Profile is not a JSON object, continuing with an empty profile");
            return Self::default();
        };

        let skills = object
            .get("skills")
            .and_then(|v| serde_json::from_value::<SkillsInput>(v.clone()).ok())
            .map(|input| input.normalize())
            .unwrap_or_default();

        let experience = ["experience", "yearsExperience", "years_experience"]
            .iter()
            .find_map(|key| object.get(*key))
            .and_then(parse_experience);

        let target_role = ["targetRole", "target_role", "preferredRole"]
            .iter()
            .find_map(|key| object.get(*key))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string);

        let name = object
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            name,
            skills,
            experience,
            target_role,
        }
    }
}

fn parse_experience(value: &Value) -> Option<f64> {
    let years = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (years.is_finite() && years >= 0.0).then_some(years)
}

fn dedup_skills<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if !skills.iter().any(|s| s.eq_ignore_ascii_case(token)) {
            skills.push(token.to_string());
        }
    }
    skills
}

/// Union of profile skills and resume-derived skills, case-insensitively deduplicated.
pub fn union_skills(profile_skills: &[String], extracted: &[String]) -> Vec<String> {
    dedup_skills(
        profile_skills
            .iter()
            .chain(extracted.iter())
            .map(String::as_str),
    )
}
