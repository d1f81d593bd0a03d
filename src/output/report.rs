//! Report bundle returned to callers, with per-section success or failure

use crate::error::{CareerMatchError, Result};
use crate::processing::gap::SkillGapReport;
use crate::processing::market::{ExperienceBucket, MarketSummary};
use crate::processing::matcher::JobMatchReport;
use crate::processing::profile::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The combined analysis result for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBundle {
    /// Normalized candidate profile
    pub profile: Profile,

    /// Skills found in the resume text, in vocabulary order
    pub resume_skills: Vec<String>,

    /// Union of profile and resume skills used for every analysis
    pub skills: Vec<String>,

    /// Match Engine output
    pub job_matches: Section<JobMatchReport>,

    /// Market Aggregator output for the target role
    pub market_analysis: Section<MarketSummary>,

    /// Gap Analyzer output for the target role
    pub skill_gap_data: Section<SkillGapReport>,

    /// Experience bucket the candidate falls into, if any
    pub candidate_bucket: Option<ExperienceBucket>,

    /// Chart name to rendered artifact
    pub visualizations: BTreeMap<String, Section<ChartArtifact>>,

    /// Report metadata and generation info
    pub metadata: ReportMetadata,
}

impl ReportBundle {
    /// Sections that did not produce data, by name.
    pub fn failed_sections(&self) -> Vec<(&'static str, &SectionError)> {
        [
            ("job_matches", self.job_matches.error()),
            ("market_analysis", self.market_analysis.error()),
            ("skill_gap_data", self.skill_gap_data.error()),
        ]
        .into_iter()
        .filter_map(|(name, error)| error.map(|e| (name, e)))
        .collect()
    }

    /// Paths of every chart that rendered.
    pub fn chart_paths(&self) -> BTreeMap<&str, &PathBuf> {
        self.visualizations
            .iter()
            .filter_map(|(name, section)| section.as_ready().map(|artifact| (name.as_str(), &artifact.path)))
            .collect()
    }
}

/// Either a computed value or the reason it is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    Failed(SectionError),
}

impl<T> Section<T> {
    pub fn failed(error: &CareerMatchError) -> Self {
        Section::Failed(SectionError::from(error))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            Section::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SectionError> {
        match self {
            Section::Ready(_) => None,
            Section::Failed(error) => Some(error),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    /// Borrow the value, or clone out the recorded failure.
    pub fn as_result(&self) -> std::result::Result<&T, SectionError> {
        match self {
            Section::Ready(value) => Ok(value),
            Section::Failed(error) => Err(error.clone()),
        }
    }
}

impl<T> From<Result<T>> for Section<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(e) => Section::Failed(SectionError::from(&e)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionError {
    pub kind: SectionErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionErrorKind {
    NoData,
    NoSkills,
    InsufficientData,
    Chart,
    Internal,
}

impl From<&CareerMatchError> for SectionError {
    fn from(error: &CareerMatchError) -> Self {
        let kind = match error {
            CareerMatchError::NoData => SectionErrorKind::NoData,
            CareerMatchError::NoSkills => SectionErrorKind::NoSkills,
            CareerMatchError::InsufficientData { .. } => SectionErrorKind::InsufficientData,
            CareerMatchError::Chart(_) => SectionErrorKind::Chart,
            _ => SectionErrorKind::Internal,
        };
        Self {
            kind,
            message: error.to_string(),
        }
    }
}

/// A chart image written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartArtifact {
    pub title: String,
    pub path: PathBuf,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the tool that produced the report
    pub tool_version: String,

    /// Listings in the dataset
    pub dataset_size: usize,

    /// File the dataset was read from
    pub dataset_source: Option<String>,

    /// Total processing time
    pub processing_time_ms: u64,
}
