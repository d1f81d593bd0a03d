//! Skill-overlap matching of a candidate against job listings

use crate::config::AnalysisConfig;
use crate::dataset::{Listing, LocationPreference};
use crate::error::{CareerMatchError, Result};
use crate::processing::frequency::FrequencyTable;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How well one listing fits the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub preferred_role: String,
    /// Share of the listing's skills the candidate has, in `[0, 100]`.
    pub match_percentage: f64,
    pub matched_skills: Vec<String>,
    pub years_experience: f64,
    pub current_salary: f64,
    pub location_preference: LocationPreference,
    pub state_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDemand {
    pub skill: String,
    pub demand_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchReport {
    pub top_matches: Vec<MatchResult>,
    /// Dataset-wide demand for each candidate skill, in candidate order.
    pub skill_demand: Vec<SkillDemand>,
    /// Most frequent skills across all listings, regardless of the candidate.
    pub top_skills_in_demand: Vec<SkillCount>,
}

impl JobMatchReport {
    pub fn demand_for(&self, skill: &str) -> Option<f64> {
        let skill = skill.trim().to_lowercase();
        self.skill_demand
            .iter()
            .find(|d| d.skill == skill)
            .map(|d| d.demand_percentage)
    }
}

/// Ranks listings by overlap with the candidate's skills.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    top_matches: usize,
    top_skills: usize,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl MatchEngine {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            top_matches: config.top_matches,
            top_skills: config.top_skills,
        }
    }

    pub fn match_jobs(&self, listings: &[Listing], candidate_skills: &[String]) -> Result<JobMatchReport> {
        if listings.is_empty() {
            return Err(CareerMatchError::NoData);
        }

        let candidate = lowercase_skills(candidate_skills);
        if candidate.is_empty() {
            return Err(CareerMatchError::NoSkills);
        }
        let candidate_set: HashSet<&str> = candidate.iter().map(String::as_str).collect();

        let mut matches: Vec<MatchResult> = listings
            .iter()
            .filter(|listing| listing.has_skills())
            .filter_map(|listing| {
                let matched_skills: Vec<String> = listing
                    .skills
                    .iter()
                    .filter(|s| candidate_set.contains(s.as_str()))
                    .cloned()
                    .collect();
                let match_percentage = percentage(matched_skills.len(), listing.skills.len());
                (match_percentage > 0.0).then(|| MatchResult {
                    preferred_role: listing.preferred_role.clone(),
                    match_percentage,
                    matched_skills,
                    years_experience: listing.years_experience,
                    current_salary: listing.current_salary,
                    location_preference: listing.location_preference,
                    state_code: listing.state_code.clone(),
                })
            })
            .collect();

        let matching = matches.len();
        // Stable: equal scores keep dataset order
        matches.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
        matches.truncate(self.top_matches);

        let frequencies: FrequencyTable<&str> = listings
            .iter()
            .flat_map(|listing| listing.skills.iter().map(String::as_str))
            .collect();

        let skill_demand = candidate
            .iter()
            .map(|skill| SkillDemand {
                demand_percentage: percentage(frequencies.count(&skill.as_str()), listings.len()),
                skill: skill.clone(),
            })
            .collect();

        let top_skills_in_demand = frequencies
            .most_common(self.top_skills)
            .into_iter()
            .map(|(skill, count)| SkillCount {
                skill: skill.to_string(),
                count,
            })
            .collect();

        info!(
            "Matched {} of {} listings against {} candidate skills",
            matching,
            listings.len(),
            candidate.len()
        );
        debug!("Kept top {} matches", matches.len());

        Ok(JobMatchReport {
            top_matches: matches,
            skill_demand,
            top_skills_in_demand,
        })
    }
}

/// `count / max(total, 1) * 100`
pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    count as f64 / total.max(1) as f64 * 100.0
}

/// Trimmed, lowercased, deduplicated skills in first-seen order.
pub(crate) fn lowercase_skills(skills: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for skill in skills {
        let skill = skill.trim().to_lowercase();
        if !skill.is_empty() && !out.contains(&skill) {
            out.push(skill);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::EducationLevel;

    fn listing(role: &str, skills: &[&str]) -> Listing {
        Listing {
            preferred_role: role.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            years_experience: 3.0,
            current_salary: 90000.0,
            education_level: EducationLevel::Bachelor,
            has_certifications: true,
            location_preference: LocationPreference::Remote,
            state_code: Some("CA".to_string()),
        }
    }

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_listing_half_match() {
        let listings = vec![listing("Backend Developer", &["python", "sql"])];
        let report = MatchEngine::default()
            .match_jobs(&listings, &skills(&["python"]))
            .unwrap();

        assert_eq!(report.top_matches.len(), 1);
        assert_eq!(report.top_matches[0].match_percentage, 50.0);
        assert_eq!(report.top_matches[0].matched_skills, vec!["python"]);
        assert_eq!(report.demand_for("Python"), Some(100.0));
    }

    #[test]
    fn test_empty_inputs_are_errors() {
        let engine = MatchEngine::default();
        assert!(matches!(
            engine.match_jobs(&[], &skills(&["python"])),
            Err(CareerMatchError::NoData)
        ));

        let listings = vec![listing("Backend Developer", &["python"])];
        assert!(matches!(
            engine.match_jobs(&listings, &[]),
            Err(CareerMatchError::NoSkills)
        ));
        assert!(matches!(
            engine.match_jobs(&listings, &skills(&["  "])),
            Err(CareerMatchError::NoSkills)
        ));
    }

    #[test]
    fn test_zero_matches_excluded_and_skillless_skipped() {
        let listings = vec![
            listing("Designer", &["figma"]),
            listing("Unknown", &[]),
            listing("Analyst", &["sql", "excel"]),
        ];
        let report = MatchEngine::default()
            .match_jobs(&listings, &skills(&["SQL"]))
            .unwrap();

        assert_eq!(report.top_matches.len(), 1);
        assert_eq!(report.top_matches[0].preferred_role, "Analyst");
        // demand denominator counts skill-less listings too
        assert!((report.demand_for("sql").unwrap() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_stable_and_truncated() {
        let mut listings = Vec::new();
        for i in 0..15 {
            let role = format!("Role {}", i);
            if i % 2 == 0 {
                listings.push(listing(&role, &["rust", "go"]));
            } else {
                listings.push(listing(&role, &["rust"]));
            }
        }

        let report = MatchEngine::default()
            .match_jobs(&listings, &skills(&["rust"]))
            .unwrap();

        assert_eq!(report.top_matches.len(), 10);
        let roles: Vec<&str> = report.top_matches.iter().map(|m| m.preferred_role.as_str()).collect();
        assert_eq!(&roles[..3], &["Role 1", "Role 3", "Role 5"]);
        assert!(report
            .top_matches
            .windows(2)
            .all(|w| w[0].match_percentage >= w[1].match_percentage));
    }

    #[test]
    fn test_absent_skill_has_zero_demand() {
        let listings = vec![listing("Backend Developer", &["python", "sql"])];
        let report = MatchEngine::default()
            .match_jobs(&listings, &skills(&["python", "COBOL"]))
            .unwrap();
        assert_eq!(report.demand_for("cobol"), Some(0.0));
        assert_eq!(report.skill_demand.len(), 2);
    }

    #[test]
    fn test_top_skills_are_global() {
        let listings = vec![
            listing("A", &["sql", "python"]),
            listing("B", &["python", "java"]),
            listing("C", &["java", "python"]),
        ];
        let report = MatchEngine::default()
            .match_jobs(&listings, &skills(&["sql"]))
            .unwrap();

        let top: Vec<(&str, usize)> = report
            .top_skills_in_demand
            .iter()
            .map(|s| (s.skill.as_str(), s.count))
            .collect();
        assert_eq!(top, vec![("python", 3), ("java", 2), ("sql", 1)]);
    }

    #[test]
    fn test_idempotent() {
        let listings = vec![
            listing("A", &["sql", "python"]),
            listing("B", &["python", "java"]),
        ];
        let engine = MatchEngine::default();
        let first = engine.match_jobs(&listings, &skills(&["python"])).unwrap();
        let second = engine.match_jobs(&listings, &skills(&["python"])).unwrap();
        assert_eq!(first, second);
    }
}
