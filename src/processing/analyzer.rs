//! Report assembly: runs every analysis for one candidate and renders charts

use crate::config::{AnalysisConfig, Config};
use crate::dataset::{Dataset, RoleFilter};
use crate::error::Result;
use crate::output::charts::{self, ChartRenderer, ChartSpec, PlottersRenderer};
use crate::output::report::{ChartArtifact, ReportBundle, ReportMetadata, Section, SectionError};
use crate::processing::gap::GapAnalyzer;
use crate::processing::market::{ExperienceBucket, MarketAggregator};
use crate::processing::matcher::MatchEngine;
use crate::processing::profile::{union_skills, Profile};
use crate::processing::skill_extractor::SkillExtractor;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

/// Incoming request: a profile document plus optional resume text.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub profile: Value,
    #[serde(default)]
    pub resume_text: Option<String>,
}

struct ChartOutput {
    renderer: Box<dyn ChartRenderer>,
    output_dir: PathBuf,
}

/// Coordinates the analysis components for one report.
///
/// Holds no per-request state; the dataset is borrowed for each call.
pub struct CareerAnalyzer {
    extractor: SkillExtractor,
    match_engine: MatchEngine,
    market: MarketAggregator,
    gap: GapAnalyzer,
    limits: AnalysisConfig,
    charts: Option<ChartOutput>,
}

impl CareerAnalyzer {
    /// Analyzer without chart rendering.
    pub fn new(limits: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            extractor: SkillExtractor::new()?,
            match_engine: MatchEngine::new(limits),
            market: MarketAggregator::new(limits),
            gap: GapAnalyzer::new(limits),
            limits: *limits,
            charts: None,
        })
    }

    /// Analyzer wired from configuration, with plotters charts when enabled.
    pub fn from_config(config: &Config) -> Result<Self> {
        let analyzer = Self::new(&config.analysis)?;
        if !config.charts.enabled {
            return Ok(analyzer);
        }
        Ok(analyzer.with_charts(
            Box::new(PlottersRenderer::new(config.charts.width, config.charts.height)),
            config.charts.output_dir.clone(),
        ))
    }

    pub fn with_charts(mut self, renderer: Box<dyn ChartRenderer>, output_dir: impl Into<PathBuf>) -> Self {
        self.charts = Some(ChartOutput {
            renderer,
            output_dir: output_dir.into(),
        });
        self
    }

    /// Serve a `{profile, resume_text?}` request.
    pub fn handle_request(&self, dataset: &Dataset, request: &ReportRequest) -> ReportBundle {
        let profile = Profile::from_value(&request.profile);
        self.build_report(dataset, profile, request.resume_text.as_deref())
    }

    /// Run every analysis and collect the results. Never fails as a whole:
    /// each section records its own error.
    pub fn build_report(&self, dataset: &Dataset, profile: Profile, resume_text: Option<&str>) -> ReportBundle {
        let start_time = Instant::now();

        let resume_skills = resume_text
            .map(|text| self.extractor.extract(text))
            .unwrap_or_default();
        let skills = union_skills(&profile.skills, &resume_skills);
        log::info!(
            "Analyzing candidate with {} skills ({} from resume)",
            skills.len(),
            resume_skills.len()
        );

        let filter = RoleFilter::new(profile.target_role.as_deref());
        let listings = dataset.listings();

        let job_matches = section("job matches", self.match_engine.match_jobs(listings, &skills));
        let market_analysis = section("market analysis", self.market.analyze_market(listings, &filter));
        let skill_gap_data = section(
            "skill gap",
            self.gap.analyze_skill_gap(listings, &skills, &filter),
        );

        let candidate_bucket = profile.experience.and_then(ExperienceBucket::containing);

        let mut report = ReportBundle {
            profile,
            resume_skills,
            skills,
            job_matches,
            market_analysis,
            skill_gap_data,
            candidate_bucket,
            visualizations: BTreeMap::new(),
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                dataset_size: dataset.len(),
                dataset_source: dataset.source().map(|p| p.display().to_string()),
                processing_time_ms: 0,
            },
        };

        report.visualizations = self.render_charts(&report);
        report.metadata.processing_time_ms = start_time.elapsed().as_millis() as u64;
        report
    }

    fn chart_specs(&self, report: &ReportBundle) -> Vec<(&'static str, std::result::Result<ChartSpec, SectionError>)> {
        let role = report.profile.target_role.as_deref();
        let experience = report.profile.experience;
        let market = report.market_analysis.as_result();

        vec![
            (
                charts::SKILL_MATCH,
                report
                    .job_matches
                    .as_result()
                    .map(|m| charts::skill_match_chart(m, self.limits.top_skills)),
            ),
            (
                charts::JOB_LOCATIONS,
                market.clone().map(|m| charts::job_locations_chart(m, role)),
            ),
            (
                charts::SALARY_TRENDS,
                market.clone().map(|m| charts::salary_trends_chart(m, role, experience)),
            ),
            (
                charts::EDUCATION_DISTRIBUTION,
                market
                    .clone()
                    .map(|m| charts::education_chart(m, role, self.limits.education_top_n)),
            ),
            (
                charts::CERTIFICATION_IMPACT,
                market.map(|m| charts::certification_chart(m, role)),
            ),
            (
                charts::SKILL_GAP,
                report
                    .skill_gap_data
                    .as_result()
                    .map(|g| charts::skill_gap_chart(g, role)),
            ),
        ]
    }

    fn render_charts(&self, report: &ReportBundle) -> BTreeMap<String, Section<ChartArtifact>> {
        let Some(output) = &self.charts else {
            return BTreeMap::new();
        };

        self.chart_specs(report)
            .into_iter()
            .map(|(name, spec)| {
                let chart = match spec {
                    Err(error) => Section::Failed(error),
                    Ok(spec) => {
                        let path = output.output_dir.join(format!("{}.png", name));
                        match output.renderer.render(&spec, &path) {
                            Ok(path) => Section::Ready(ChartArtifact {
                                title: spec.title,
                                path,
                            }),
                            Err(e) => {
                                log::warn!("Chart {} failed: {}", name, e);
                                Section::failed(&e)
                            }
                        }
                    }
                };
                (name.to_string(), chart)
            })
            .collect()
    }
}

fn section<T>(name: &str, result: Result<T>) -> Section<T> {
    if let Err(e) = &result {
        if e.is_data_shortage() {
            log::info!("Section {} has no data: {}", name, e);
        } else {
            log::warn!("Section {} failed: {}", name, e);
        }
    }
    Section::from(result)
}
