//! Skill gap: which in-demand skills the candidate already has

use crate::config::AnalysisConfig;
use crate::dataset::{Listing, RoleFilter};
use crate::error::{CareerMatchError, Result};
use crate::processing::frequency::FrequencyTable;
use crate::processing::matcher::{lowercase_skills, percentage};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapEntry {
    pub skill: String,
    pub count: usize,
    /// Share of the filtered listings naming this skill.
    pub demand_percentage: f64,
    pub has_skill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapReport {
    pub role_filter: Option<String>,
    pub listings_considered: usize,
    /// Descending by demand.
    pub skills: Vec<SkillGapEntry>,
}

impl SkillGapReport {
    /// In-demand skills the candidate lacks, most wanted first.
    pub fn missing(&self) -> impl Iterator<Item = &SkillGapEntry> {
        self.skills.iter().filter(|entry| !entry.has_skill)
    }

    /// Percentage of the listed skills the candidate already has.
    pub fn coverage_percentage(&self) -> f64 {
        let held = self.skills.iter().filter(|entry| entry.has_skill).count();
        percentage(held, self.skills.len())
    }
}

#[derive(Debug, Clone)]
pub struct GapAnalyzer {
    top_n: usize,
}

impl Default for GapAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl GapAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            top_n: config.gap_top_n,
        }
    }

    pub fn analyze_skill_gap(
        &self,
        listings: &[Listing],
        candidate_skills: &[String],
        filter: &RoleFilter,
    ) -> Result<SkillGapReport> {
        if listings.is_empty() {
            return Err(CareerMatchError::NoData);
        }

        let jobs = filter.apply(listings);
        if jobs.is_empty() {
            return Err(CareerMatchError::InsufficientData {
                role: filter.pattern().map(str::to_string),
            });
        }

        let candidate = lowercase_skills(candidate_skills);
        let candidate: HashSet<&str> = candidate.iter().map(String::as_str).collect();

        let frequencies: FrequencyTable<&str> = jobs
            .iter()
            .flat_map(|job| job.skills.iter().map(String::as_str))
            .collect();

        let mut skills: Vec<SkillGapEntry> = frequencies
            .most_common(self.top_n)
            .into_iter()
            .map(|(skill, count)| SkillGapEntry {
                skill: skill.to_string(),
                count,
                demand_percentage: percentage(count, jobs.len()),
                has_skill: candidate.contains(skill),
            })
            .collect();
        // Already in count order; the stable re-sort keeps that order on ties
        skills.sort_by(|a, b| b.demand_percentage.total_cmp(&a.demand_percentage));

        info!(
            "Skill gap over {} listings: {} top skills, {} held by candidate",
            jobs.len(),
            skills.len(),
            skills.iter().filter(|s| s.has_skill).count()
        );

        Ok(SkillGapReport {
            role_filter: filter.pattern().map(str::to_string),
            listings_considered: jobs.len(),
            skills,
        })
    }
}
