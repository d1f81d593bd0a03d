//! Integration tests for the career matcher

use career_match::config::{AnalysisConfig, OutputFormat};
use career_match::dataset::loader::load_listings;
use career_match::dataset::{Dataset, EducationLevel, LocationPreference, RoleFilter};
use career_match::error::{CareerMatchError, Result};
use career_match::input::InputManager;
use career_match::output::charts::{self, ChartRenderer, ChartSpec};
use career_match::output::formatter::{save_report_to_file, suggest_filename};
use career_match::output::report::SectionErrorKind;
use career_match::output::ReportGenerator;
use career_match::processing::gap::GapAnalyzer;
use career_match::processing::market::{ExperienceBucket, MarketAggregator};
use career_match::processing::matcher::MatchEngine;
use career_match::processing::{CareerAnalyzer, Profile, ReportRequest, SkillExtractor};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

fn fixture_dataset() -> Dataset {
    load_listings(Path::new("tests/fixtures/job_listings.csv")).unwrap()
}

fn skills(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Clone, Default)]
struct RecordingRenderer {
    titles: Rc<RefCell<Vec<String>>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, spec: &ChartSpec, output_path: &Path) -> Result<PathBuf> {
        self.titles.borrow_mut().push(spec.title.clone());
        Ok(output_path.to_path_buf())
    }
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("Jordan Lee"));
    assert!(text.contains("Data Analyst"));
    assert!(text.contains("Docker"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Jordan Lee"));
    assert!(text.contains("Pandas"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));

    let found = SkillExtractor::new().unwrap().extract(&text);
    assert_eq!(found, skills(&["Python", "SQL", "Docker", "Pandas"]));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(CareerMatchError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(result.is_err());
}

#[test]
fn test_fixture_cleaning() {
    let dataset = fixture_dataset();
    assert_eq!(dataset.len(), 8);
    let listings = dataset.listings();

    // Blank experience takes the median of the parsed values
    assert_eq!(listings[5].years_experience, 4.0);
    assert!(!listings[5].has_certifications);
    assert_eq!(listings[5].state_code, None);

    // Unknown education level falls back to Bachelor's
    assert_eq!(listings[6].education_level, EducationLevel::Bachelor);
    assert!(listings[6].has_certifications);

    // Unparsable salary takes the median, blank location the most frequent one
    assert_eq!(listings[7].current_salary, 95000.0);
    assert_eq!(listings[7].location_preference, LocationPreference::Remote);

    assert_eq!(listings[0].skills, skills(&["python", "sql", "machine learning"]));
}

#[test]
fn test_missing_listings_file_is_error() {
    let result = load_listings(Path::new("tests/fixtures/missing.csv"));
    assert!(matches!(result, Err(CareerMatchError::InvalidInput(_))));
}

#[test]
fn test_half_overlap_scores_fifty_percent() {
    let dataset = fixture_dataset();
    let report = MatchEngine::default()
        .match_jobs(dataset.listings(), &skills(&["SQL"]))
        .unwrap();

    let tableau = report
        .top_matches
        .iter()
        .find(|m| m.matched_skills == skills(&["sql"]) && m.preferred_role == "Data Scientist" && m.match_percentage == 50.0);
    assert!(tableau.is_some());
    assert_eq!(report.demand_for("sql"), Some(37.5));
}

#[test]
fn test_match_ranking_over_fixture() {
    let dataset = fixture_dataset();
    let candidate = skills(&["Python", "SQL", "Docker", "Git", "Jira", "Pandas"]);
    let report = MatchEngine::default().match_jobs(dataset.listings(), &candidate).unwrap();

    // Frontend listings share nothing and are dropped
    assert_eq!(report.top_matches.len(), 6);
    assert!(report
        .top_matches
        .windows(2)
        .all(|w| w[0].match_percentage >= w[1].match_percentage));
    assert_eq!(report.top_matches[0].matched_skills, skills(&["python", "sql"]));
    assert_eq!(report.top_matches[2].preferred_role, "Backend Developer");
    assert!(report
        .top_matches
        .iter()
        .all(|m| m.match_percentage > 0.0 && m.match_percentage <= 100.0));

    assert_eq!(report.demand_for("python"), Some(37.5));
    assert_eq!(report.demand_for("docker"), Some(25.0));
    assert_eq!(report.demand_for("jira"), Some(0.0));
}

#[test]
fn test_empty_dataset_reports_no_data() {
    let empty = Dataset::empty();
    let filter = RoleFilter::any();
    assert!(matches!(
        MatchEngine::default().match_jobs(empty.listings(), &skills(&["python"])),
        Err(CareerMatchError::NoData)
    ));
    assert!(matches!(
        MarketAggregator::default().analyze_market(empty.listings(), &filter),
        Err(CareerMatchError::NoData)
    ));
    assert!(matches!(
        GapAnalyzer::default().analyze_skill_gap(empty.listings(), &[], &filter),
        Err(CareerMatchError::NoData)
    ));
}

#[test]
fn test_market_for_role() {
    let dataset = fixture_dataset();
    let market = MarketAggregator::default()
        .analyze_market(dataset.listings(), &RoleFilter::new(Some("data scientist")))
        .unwrap();

    assert_eq!(market.total_jobs, 3);
    assert_eq!(market.state_distribution[0].label, "CA");
    assert_eq!(market.state_distribution[0].count, 2);
    assert!((market.average_salary - 260000.0 / 3.0).abs() < 1e-6);

    let early = ExperienceBucket { lower: 0, upper: 2 };
    let mid = ExperienceBucket { lower: 2, upper: 5 };
    assert_eq!(market.bucket_salary(&early), Some(70000.0));
    assert_eq!(market.bucket_salary(&mid), Some(95000.0));
    assert_eq!(market.salary_by_experience.len(), 2);

    assert_eq!(market.certification_impact.with_certifications, Some(95000.0));
    assert_eq!(market.certification_impact.without_certifications, Some(82500.0));
    let education: Vec<&str> = market.education_distribution.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(education, vec!["Master's", "Bachelor's", "PhD"]);
}

#[test]
fn test_bucket_edges() {
    assert_eq!(ExperienceBucket::containing(0.0), None);
    assert_eq!(ExperienceBucket::containing(2.0).map(|b| b.upper), Some(2));
    assert_eq!(ExperienceBucket::containing(2.5).map(|b| b.lower), Some(2));
    assert_eq!(ExperienceBucket::containing(8.0).map(|b| b.upper), Some(8));
    assert_eq!(ExperienceBucket::containing(100.0).map(|b| b.lower), Some(8));
    assert_eq!(ExperienceBucket::containing(100.5), None);
}

#[test]
fn test_analysis_is_repeatable() {
    let dataset = fixture_dataset();
    let analyzer = CareerAnalyzer::new(&AnalysisConfig::default()).unwrap();
    let profile = Profile::from_json(&std::fs::read_to_string("tests/fixtures/profile.json").unwrap());

    let first = analyzer.build_report(&dataset, profile.clone(), None);
    let second = analyzer.build_report(&dataset, profile, None);

    assert_eq!(first.job_matches, second.job_matches);
    assert_eq!(first.market_analysis, second.market_analysis);
    assert_eq!(first.skill_gap_data, second.skill_gap_data);
}

#[tokio::test]
async fn test_end_to_end_report() {
    let dataset = fixture_dataset();
    let renderer = RecordingRenderer::default();
    let analyzer = CareerAnalyzer::new(&AnalysisConfig::default())
        .unwrap()
        .with_charts(Box::new(renderer.clone()), "charts");

    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let profile = Profile::from_json(&std::fs::read_to_string("tests/fixtures/profile.json").unwrap());
    let report = analyzer.build_report(&dataset, profile, Some(&resume));

    assert_eq!(report.profile.name.as_deref(), Some("Jordan Lee"));
    assert_eq!(report.resume_skills, skills(&["Python", "SQL", "Docker", "Git", "Jira", "Pandas"]));
    assert_eq!(report.skills.len(), 6);
    assert_eq!(report.candidate_bucket, Some(ExperienceBucket { lower: 2, upper: 5 }));
    assert!(report.failed_sections().is_empty());

    let gap = report.skill_gap_data.as_ready().unwrap();
    assert_eq!(gap.listings_considered, 3);
    let missing: Vec<&str> = gap.missing().map(|e| e.skill.as_str()).collect();
    assert_eq!(missing, vec!["machine learning", "statistics", "tableau"]);

    assert_eq!(report.visualizations.len(), 6);
    assert_eq!(
        report.chart_paths().get(charts::SALARY_TRENDS).map(|p| p.as_path()),
        Some(Path::new("charts/salary_trends.png"))
    );
    assert!(renderer
        .titles
        .borrow()
        .contains(&"Salary by Experience: Data Scientist".to_string()));
}

#[test]
fn test_request_with_malformed_profile() {
    let analyzer = CareerAnalyzer::new(&AnalysisConfig::default()).unwrap();
    let request: ReportRequest = serde_json::from_str(r#"{"profile": 42}"#).unwrap();
    let report = analyzer.handle_request(&fixture_dataset(), &request);

    assert_eq!(report.profile, Profile::default());
    assert_eq!(report.job_matches.error().unwrap().kind, SectionErrorKind::NoSkills);
    assert!(report.market_analysis.is_ready());
}

#[test]
fn test_report_formats_and_save() {
    let analyzer = CareerAnalyzer::new(&AnalysisConfig::default()).unwrap();
    let profile = Profile::from_json(r#"{"name": "Jordan Lee", "skills": "python, sql", "targetRole": "Nurse"}"#);
    let report = analyzer.build_report(&fixture_dataset(), profile, None);
    assert_eq!(
        report.market_analysis.error().unwrap().kind,
        SectionErrorKind::InsufficientData
    );

    let generator = ReportGenerator::with_options(false, true);
    let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["job_matches"]["status"], "ready");
    assert_eq!(value["market_analysis"]["data"]["kind"], "insufficient_data");

    let markdown = generator.generate_report(&report, OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("Jordan Lee"));

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir
        .path()
        .join(suggest_filename(OutputFormat::Markdown, "Jordan Lee", false));
    save_report_to_file(&markdown, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), markdown);
}
