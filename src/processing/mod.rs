//! Candidate analysis: skill extraction, matching, market and gap statistics

pub mod analyzer;
pub mod frequency;
pub mod gap;
pub mod market;
pub mod matcher;
pub mod profile;
pub mod skill_extractor;

pub use analyzer::{CareerAnalyzer, ReportRequest};
pub use profile::Profile;
pub use skill_extractor::SkillExtractor;
