//! Output formatters: console, JSON, Markdown and HTML renderings of a report

use crate::config::OutputFormat;
use crate::error::{CareerMatchError, Result};
use crate::output::report::{ReportBundle, Section, SectionError};
use crate::processing::gap::SkillGapReport;
use crate::processing::market::{CategoryCount, MarketSummary};
use crate::processing::matcher::JobMatchReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting report bundles
pub trait OutputFormatter {
    fn format_report(&self, report: &ReportBundle) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and sharing
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter embedding the rendered charts
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Career Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 960px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .section { margin: 25px 0; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #e9ecef; }
        .unavailable {
            background: #fff3cd;
            border-left: 4px solid #ffc107;
            padding: 10px 15px;
            border-radius: 6px;
        }
        .have { color: #28a745; font-weight: bold; }
        .learn { color: #dc3545; font-weight: bold; }
        .chart img { max-width: 100%; border: 1px solid #e9ecef; border-radius: 6px; }
        .metadata {
            font-size: 0.9em;
            color: #6c757d;
            border-top: 1px solid #e9ecef;
            margin-top: 30px;
            padding-top: 15px;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Career Match Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Candidate</h2>
            {% if has_name %}<p><strong>Name:</strong> {{ name }}</p>{% endif %}
            <p><strong>Experience:</strong> {{ experience }}</p>
            <p><strong>Target role:</strong> {{ target_role }}</p>
            <p><strong>Skills:</strong> {{ skills }}</p>
        </div>

        <div class="section">
            <h2>Job Matches</h2>
            {% if let Some(m) = matches %}
            <table>
                <tr><th>#</th><th>Role</th><th>Match</th><th>Experience</th><th>Salary</th><th>Location</th><th>State</th></tr>
                {% for row in m.rows %}
                <tr><td>{{ loop.index }}</td><td>{{ row.role }}</td><td>{{ row.percentage }}</td><td>{{ row.experience }}</td><td>{{ row.salary }}</td><td>{{ row.location }}</td><td>{{ row.state }}</td></tr>
                {% endfor %}
            </table>
            <h3>Demand for your skills</h3>
            <ul>{% for d in m.demand %}<li>{{ d.label }}: {{ d.value }} of listings</li>{% endfor %}</ul>
            <h3>Most requested skills</h3>
            <ul>{% for t in m.top_skills %}<li>{{ t.label }}: {{ t.value }} listings</li>{% endfor %}</ul>
            {% else %}
            <p class="unavailable">Unavailable: {{ matches_error }}</p>
            {% endif %}
        </div>

        <div class="section">
            <h2>Market Analysis</h2>
            {% if let Some(m) = market %}
            <p><strong>Listings:</strong> {{ m.total_jobs }} | <strong>Average salary:</strong> {{ m.average_salary }}</p>
            <table>
                <tr><th>Experience</th><th>Mean salary</th><th>Listings</th></tr>
                {% for b in m.salary_rows %}
                <tr><td>{{ b.label }}</td><td>{{ b.mean_salary }}</td><td>{{ b.listings }}</td></tr>
                {% endfor %}
            </table>
            <h3>Top states</h3>
            <ul>{% for st in m.states %}<li>{{ st.label }}: {{ st.value }}</li>{% endfor %}</ul>
            <h3>Education</h3>
            <ul>{% for e in m.education %}<li>{{ e.label }}: {{ e.value }}</li>{% endfor %}</ul>
            <h3>Certifications</h3>
            <p>With: {{ m.with_certifications }} | Without: {{ m.without_certifications }}</p>
            {% else %}
            <p class="unavailable">Unavailable: {{ market_error }}</p>
            {% endif %}
        </div>

        <div class="section">
            <h2>Skill Gap</h2>
            {% if let Some(g) = gap %}
            <p>You hold {{ g.coverage }} of the most requested skills.</p>
            <table>
                <tr><th>Skill</th><th>Demand</th><th>Status</th></tr>
                {% for row in g.rows %}
                <tr><td>{{ row.skill }}</td><td>{{ row.demand }}</td><td>{% if row.has_skill %}<span class="have">have</span>{% else %}<span class="learn">to learn</span>{% endif %}</td></tr>
                {% endfor %}
            </table>
            {% else %}
            <p class="unavailable">Unavailable: {{ gap_error }}</p>
            {% endif %}
        </div>

        {% if !charts.is_empty() %}
        <div class="section">
            <h2>Charts</h2>
            {% for c in charts %}
            <div class="chart"><h3>{{ c.title }}</h3><img src="{{ c.path }}" alt="{{ c.name }}"></div>
            {% endfor %}
        </div>
        {% endif %}

        <div class="metadata">
            <p><strong>Generated by career-match v{{ version }}</strong></p>
            <p><strong>Dataset:</strong> {{ dataset }} ({{ dataset_size }} listings)</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    has_name: bool,
    name: String,
    experience: String,
    target_role: String,
    skills: String,
    matches: Option<MatchesView>,
    matches_error: String,
    market: Option<MarketView>,
    market_error: String,
    gap: Option<GapView>,
    gap_error: String,
    charts: Vec<ChartView>,
    version: String,
    dataset: String,
    dataset_size: usize,
}

/// Display-ready values for the HTML template; askama escapes them on output.
struct LabelValue {
    label: String,
    value: String,
}

struct MatchRow {
    role: String,
    percentage: String,
    experience: String,
    salary: String,
    location: String,
    state: String,
}

struct MatchesView {
    rows: Vec<MatchRow>,
    demand: Vec<LabelValue>,
    top_skills: Vec<LabelValue>,
}

struct SalaryRow {
    label: String,
    mean_salary: String,
    listings: usize,
}

struct MarketView {
    total_jobs: usize,
    average_salary: String,
    salary_rows: Vec<SalaryRow>,
    states: Vec<LabelValue>,
    education: Vec<LabelValue>,
    with_certifications: String,
    without_certifications: String,
}

struct GapRow {
    skill: String,
    demand: String,
    has_skill: bool,
}

struct GapView {
    coverage: String,
    rows: Vec<GapRow>,
}

struct ChartView {
    name: String,
    title: String,
    path: String,
}

/// `$` amount with thousands separators, rounded to whole dollars.
pub fn format_money(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn money_or_na(mean: Option<f64>) -> String {
    mean.map(format_money).unwrap_or_else(|| "n/a".to_string())
}

fn describe_experience(years: Option<f64>) -> String {
    match years {
        Some(years) => format!("{} years", years),
        None => "not given".to_string(),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_unavailable(&self, error: &SectionError) -> String {
        format!("  {} {}\n", self.colorize("⚠ unavailable:", Color::Yellow), error.message)
    }

    fn format_matches(&self, matches: &JobMatchReport) -> String {
        let mut output = String::new();

        if matches.top_matches.is_empty() {
            output.push_str("  No listings share a skill with this candidate.\n");
        }
        for (i, m) in matches.top_matches.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. {} {} | {} yrs | {} | {} | {}\n",
                i + 1,
                self.colorize(&m.preferred_role, Color::Cyan),
                self.colorize(&format!("{:.1}%", m.match_percentage), Color::Green),
                m.years_experience,
                format_money(m.current_salary),
                m.location_preference,
                m.state_code.as_deref().unwrap_or("-")
            ));
        }

        output.push_str(&self.format_header("Demand for your skills", 3));
        for demand in &matches.skill_demand {
            output.push_str(&format!("  • {:<20} {:>5.1}% of listings\n", demand.skill, demand.demand_percentage));
        }

        if self.detailed {
            output.push_str(&self.format_header("Most requested skills", 3));
            for skill in &matches.top_skills_in_demand {
                output.push_str(&format!("  • {:<20} {}\n", skill.skill, skill.count));
            }
        }
        output
    }

    /// Market summary on its own, as printed by the `market` command.
    pub fn format_market(&self, market: &MarketSummary) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "  Listings: {} | Average salary: {}\n",
            market.total_jobs,
            self.colorize(&format_money(market.average_salary), Color::Green)
        ));
        if let Some(role) = &market.role_filter {
            output.push_str(&format!("  Role filter: {}\n", role));
        }

        output.push_str(&self.format_header("Salary by experience", 3));
        for bucket in &market.salary_by_experience {
            output.push_str(&format!(
                "  {:<10} {:>10} ({} listings)\n",
                bucket.label,
                format_money(bucket.mean_salary),
                bucket.listings
            ));
        }

        output.push_str(&self.format_header("Top states", 3));
        if market.state_distribution.is_empty() {
            output.push_str("  No state data.\n");
        }
        for region in &market.state_distribution {
            output.push_str(&format!("  {:<4} {}\n", region.label, region.count));
        }

        output.push_str(&self.format_header("Education", 3));
        for level in &market.education_distribution {
            output.push_str(&format!("  {:<14} {}\n", level.label, level.count));
        }

        output.push_str(&self.format_header("Certifications", 3));
        let impact = &market.certification_impact;
        output.push_str(&format!("  With:    {}\n", money_or_na(impact.with_certifications)));
        output.push_str(&format!("  Without: {}\n", money_or_na(impact.without_certifications)));
        output
    }

    fn format_gap(&self, gap: &SkillGapReport) -> String {
        let mut output = format!(
            "  Across {} listings; you hold {:.0}% of the most requested skills\n",
            gap.listings_considered,
            gap.coverage_percentage()
        );
        for entry in &gap.skills {
            let mark = if entry.has_skill {
                self.colorize("✓", Color::Green)
            } else {
                self.colorize("✗", Color::Red)
            };
            output.push_str(&format!("  {} {:<20} {:>5.1}%\n", mark, entry.skill, entry.demand_percentage));
        }
        output
    }

    fn format_section<T>(&self, section: &Section<T>, render: impl Fn(&T) -> String) -> String {
        match section {
            Section::Ready(value) => render(value),
            Section::Failed(error) => self.format_unavailable(error),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ReportBundle) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 CAREER MATCH REPORT", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms | Dataset: {} listings\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms,
            report.metadata.dataset_size
        ));

        output.push_str(&self.format_header("Candidate", 2));
        if let Some(name) = &report.profile.name {
            output.push_str(&format!("Name: {}\n", name));
        }
        output.push_str(&format!("Experience: {}\n", describe_experience(report.profile.experience)));
        if let Some(bucket) = &report.candidate_bucket {
            output.push_str(&format!("Experience bracket: {}\n", bucket));
        }
        output.push_str(&format!(
            "Target role: {}\n",
            report.profile.target_role.as_deref().unwrap_or("any")
        ));
        output.push_str(&format!("Skills: {}\n", report.skills.join(", ")));
        if self.detailed && !report.resume_skills.is_empty() {
            output.push_str(&format!("From resume: {}\n", report.resume_skills.join(", ")));
        }

        output.push_str(&self.format_header("🎯 Job Matches", 2));
        output.push_str(&self.format_section(&report.job_matches, |m| self.format_matches(m)));

        output.push_str(&self.format_header("📈 Market Analysis", 2));
        output.push_str(&self.format_section(&report.market_analysis, |m| self.format_market(m)));

        output.push_str(&self.format_header("🧭 Skill Gap", 2));
        output.push_str(&self.format_section(&report.skill_gap_data, |g| self.format_gap(g)));

        if !report.visualizations.is_empty() {
            output.push_str(&self.format_header("🖼 Charts", 2));
            for (name, chart) in &report.visualizations {
                match chart {
                    Section::Ready(artifact) => {
                        output.push_str(&format!("  {:<24} {}\n", name, artifact.path.display()))
                    }
                    Section::Failed(error) => output.push_str(&format!(
                        "  {:<24} {}\n",
                        name,
                        self.colorize(&error.message, Color::Yellow)
                    )),
                }
            }
        }

        output.push('\n');
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ReportBundle) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn unavailable(error: &SectionError) -> String {
        format!("> ⚠️ Unavailable: {}\n\n", error.message)
    }

    fn matches(matches: &JobMatchReport) -> String {
        let mut output = String::from("| # | Role | Match | Experience | Salary | Location | State |\n");
        output.push_str("|---|------|-------|------------|--------|----------|-------|\n");
        for (i, m) in matches.top_matches.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.1}% | {} | {} | {} | {} |\n",
                i + 1,
                m.preferred_role,
                m.match_percentage,
                m.years_experience,
                format_money(m.current_salary),
                m.location_preference,
                m.state_code.as_deref().unwrap_or("-")
            ));
        }
        output.push_str("\n**Demand for your skills:**\n\n");
        for demand in &matches.skill_demand {
            output.push_str(&format!("- {}: {:.1}%\n", demand.skill, demand.demand_percentage));
        }
        output.push_str("\n**Most requested skills:**\n\n");
        for skill in &matches.top_skills_in_demand {
            output.push_str(&format!("- {}: {} listings\n", skill.skill, skill.count));
        }
        output.push('\n');
        output
    }

    fn market(market: &MarketSummary) -> String {
        let mut output = format!(
            "**Listings:** {} | **Average salary:** {}\n\n",
            market.total_jobs,
            format_money(market.average_salary)
        );
        output.push_str("| Experience | Mean salary | Listings |\n");
        output.push_str("|------------|-------------|----------|\n");
        for bucket in &market.salary_by_experience {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                bucket.label,
                format_money(bucket.mean_salary),
                bucket.listings
            ));
        }
        output.push_str("\n**Top states:** ");
        let states: Vec<String> = market
            .state_distribution
            .iter()
            .map(|r| format!("{} ({})", r.label, r.count))
            .collect();
        output.push_str(&states.join(", "));
        output.push_str("\n\n**Education:** ");
        let education: Vec<String> = market
            .education_distribution
            .iter()
            .map(|level| format!("{} ({})", level.label, level.count))
            .collect();
        output.push_str(&education.join(", "));
        output.push_str(&format!(
            "\n\n**Average salary with certifications:** {} | **without:** {}\n\n",
            money_or_na(market.certification_impact.with_certifications),
            money_or_na(market.certification_impact.without_certifications)
        ));
        output
    }

    fn gap(gap: &SkillGapReport) -> String {
        let mut output = String::from("| Skill | Demand | Status |\n|-------|--------|--------|\n");
        for entry in &gap.skills {
            output.push_str(&format!(
                "| {} | {:.1}% | {} |\n",
                entry.skill,
                entry.demand_percentage,
                if entry.has_skill { "✅ have" } else { "📚 to learn" }
            ));
        }
        output.push('\n');
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ReportBundle) -> Result<String> {
        let mut output = String::from("# 📊 Career Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms | **Dataset:** {} listings\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms,
                report.metadata.dataset_size
            ));
        }

        output.push_str("## Candidate\n\n");
        if let Some(name) = &report.profile.name {
            output.push_str(&format!("- **Name:** {}\n", name));
        }
        output.push_str(&format!(
            "- **Experience:** {}\n",
            describe_experience(report.profile.experience)
        ));
        output.push_str(&format!(
            "- **Target role:** {}\n",
            report.profile.target_role.as_deref().unwrap_or("any")
        ));
        output.push_str(&format!("- **Skills:** {}\n\n", report.skills.join(", ")));

        output.push_str("## Job Matches\n\n");
        output.push_str(&match &report.job_matches {
            Section::Ready(m) => Self::matches(m),
            Section::Failed(e) => Self::unavailable(e),
        });

        output.push_str("## Market Analysis\n\n");
        output.push_str(&match &report.market_analysis {
            Section::Ready(m) => Self::market(m),
            Section::Failed(e) => Self::unavailable(e),
        });

        output.push_str("## Skill Gap\n\n");
        output.push_str(&match &report.skill_gap_data {
            Section::Ready(g) => Self::gap(g),
            Section::Failed(e) => Self::unavailable(e),
        });

        let charts = report.chart_paths();
        if !charts.is_empty() {
            output.push_str("## Charts\n\n");
            for (name, path) in charts {
                output.push_str(&format!("![{}]({})\n\n", name, path.display()));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn counts(items: &[CategoryCount]) -> Vec<LabelValue> {
        items
            .iter()
            .map(|item| LabelValue {
                label: item.label.clone(),
                value: item.count.to_string(),
            })
            .collect()
    }

    fn matches(matches: &JobMatchReport) -> MatchesView {
        MatchesView {
            rows: matches
                .top_matches
                .iter()
                .map(|m| MatchRow {
                    role: m.preferred_role.clone(),
                    percentage: format!("{:.1}%", m.match_percentage),
                    experience: m.years_experience.to_string(),
                    salary: format_money(m.current_salary),
                    location: m.location_preference.to_string(),
                    state: m.state_code.clone().unwrap_or_else(|| "-".to_string()),
                })
                .collect(),
            demand: matches
                .skill_demand
                .iter()
                .map(|d| LabelValue {
                    label: d.skill.clone(),
                    value: format!("{:.1}%", d.demand_percentage),
                })
                .collect(),
            top_skills: matches
                .top_skills_in_demand
                .iter()
                .map(|t| LabelValue {
                    label: t.skill.clone(),
                    value: t.count.to_string(),
                })
                .collect(),
        }
    }

    fn market(market: &MarketSummary) -> MarketView {
        MarketView {
            total_jobs: market.total_jobs,
            average_salary: format_money(market.average_salary),
            salary_rows: market
                .salary_by_experience
                .iter()
                .map(|bucket| SalaryRow {
                    label: bucket.label.clone(),
                    mean_salary: format_money(bucket.mean_salary),
                    listings: bucket.listings,
                })
                .collect(),
            states: Self::counts(&market.state_distribution),
            education: Self::counts(&market.education_distribution),
            with_certifications: money_or_na(market.certification_impact.with_certifications),
            without_certifications: money_or_na(market.certification_impact.without_certifications),
        }
    }

    fn gap(gap: &SkillGapReport) -> GapView {
        GapView {
            coverage: format!("{:.0}%", gap.coverage_percentage()),
            rows: gap
                .skills
                .iter()
                .map(|entry| GapRow {
                    skill: entry.skill.clone(),
                    demand: format!("{:.1}%", entry.demand_percentage),
                    has_skill: entry.has_skill,
                })
                .collect(),
        }
    }

    fn create_template_data(&self, report: &ReportBundle) -> HtmlTemplate {
        let charts = report
            .visualizations
            .iter()
            .filter_map(|(name, chart)| {
                chart.as_ready().map(|artifact| ChartView {
                    name: name.clone(),
                    title: artifact.title.clone(),
                    path: artifact.path.display().to_string(),
                })
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            has_name: report.profile.name.is_some(),
            name: report.profile.name.clone().unwrap_or_default(),
            experience: describe_experience(report.profile.experience),
            target_role: report.profile.target_role.clone().unwrap_or_else(|| "any".to_string()),
            skills: report.skills.join(", "),
            matches: report.job_matches.as_ready().map(Self::matches),
            matches_error: error_message(report.job_matches.error()),
            market: report.market_analysis.as_ready().map(Self::market),
            market_error: error_message(report.market_analysis.error()),
            gap: report.skill_gap_data.as_ready().map(Self::gap),
            gap_error: error_message(report.skill_gap_data.error()),
            charts,
            version: report.metadata.tool_version.clone(),
            dataset: report
                .metadata
                .dataset_source
                .clone()
                .unwrap_or_else(|| "none".to_string()),
            dataset_size: report.metadata.dataset_size,
        }
    }
}

fn error_message(error: Option<&SectionError>) -> String {
    error.map(|e| e.message.clone()).unwrap_or_default()
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ReportBundle) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| CareerMatchError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &ReportBundle, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, profile_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(profile_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_career_report{}.{}", base_name, timestamp_suffix, extension)
}
