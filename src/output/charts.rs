//! Chart descriptions built from report data, and a PNG renderer

use crate::error::{CareerMatchError, Result};
use crate::processing::gap::SkillGapReport;
use crate::processing::market::MarketSummary;
use crate::processing::matcher::JobMatchReport;
use log::debug;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

pub const SKILL_MATCH: &str = "skill_match";
pub const JOB_LOCATIONS: &str = "job_locations";
pub const SALARY_TRENDS: &str = "salary_trends";
pub const EDUCATION_DISTRIBUTION: &str = "education_distribution";
pub const CERTIFICATION_IMPACT: &str = "certification_impact";
pub const SKILL_GAP: &str = "skill_gap";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A point called out on top of one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMarker {
    pub index: usize,
    pub label: String,
}

/// Two-colour split of the bars, with a legend entry for each side.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlights {
    pub flags: Vec<bool>,
    pub on_label: String,
    pub off_label: String,
}

/// Everything a renderer needs to draw one bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub category_label: String,
    pub value_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub orientation: Orientation,
    pub highlights: Option<Highlights>,
    pub marker: Option<ChartMarker>,
}

impl ChartSpec {
    fn bars(title: String, category_label: &str, value_label: &str, orientation: Orientation) -> Self {
        Self {
            title,
            category_label: category_label.to_string(),
            value_label: value_label.to_string(),
            labels: Vec::new(),
            values: Vec::new(),
            orientation,
            highlights: None,
            marker: None,
        }
    }

    fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Turns a chart description into an image file.
pub trait ChartRenderer {
    /// Render `spec` to `output_path`, returning the written path.
    fn render(&self, spec: &ChartSpec, output_path: &Path) -> Result<PathBuf>;
}

fn titled(base: &str, role: Option<&str>) -> String {
    match role {
        Some(role) => format!("{}: {}", base, role),
        None => base.to_string(),
    }
}

/// Capitalise the first letter of each word, lowercasing the rest.
pub fn title_case(text: &str) -> String {
    text.split_word_bounds()
        .map(|word| {
            let mut graphemes = word.graphemes(true);
            match graphemes.next() {
                Some(first) => first.to_uppercase() + &graphemes.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect()
}

/// Candidate skills by dataset-wide demand, highest first.
pub fn skill_match_chart(matches: &JobMatchReport, limit: usize) -> ChartSpec {
    let mut spec = ChartSpec::bars(
        "Your Skills: Market Demand Analysis".to_string(),
        "Skill",
        "Demand Score (% of job listings)",
        Orientation::Horizontal,
    );

    let mut demand: Vec<_> = matches.skill_demand.iter().collect();
    demand.sort_by(|a, b| b.demand_percentage.total_cmp(&a.demand_percentage));
    for entry in demand.into_iter().take(limit) {
        spec.push(title_case(&entry.skill), entry.demand_percentage);
    }
    spec
}

pub fn job_locations_chart(market: &MarketSummary, role: Option<&str>) -> ChartSpec {
    let mut spec = ChartSpec::bars(
        titled("Job Opportunities by State", role),
        "State",
        "Number of Jobs",
        Orientation::Vertical,
    );
    for region in &market.state_distribution {
        spec.push(region.label.clone(), region.count as f64);
    }
    spec
}

/// Bucket means, with a marker on the candidate's bucket when it has data.
pub fn salary_trends_chart(market: &MarketSummary, role: Option<&str>, experience: Option<f64>) -> ChartSpec {
    let mut spec = ChartSpec::bars(
        titled("Salary by Experience", role),
        "Years of Experience",
        "Average Salary ($)",
        Orientation::Vertical,
    );
    for bucket in &market.salary_by_experience {
        spec.push(bucket.label.clone(), bucket.mean_salary);
    }

    spec.marker = experience.and_then(|years| {
        market
            .salary_by_experience
            .iter()
            .position(|b| b.bucket.contains(years))
            .map(|index| ChartMarker {
                index,
                label: format!("Your Experience ({} years)", years),
            })
    });
    spec
}

pub fn education_chart(market: &MarketSummary, role: Option<&str>, limit: usize) -> ChartSpec {
    let mut spec = ChartSpec::bars(
        titled("Education Level Distribution", role),
        "Education Level",
        "Number of Jobs",
        Orientation::Vertical,
    );
    for level in market.education_distribution.iter().take(limit) {
        spec.push(level.label.clone(), level.count as f64);
    }
    spec
}

pub fn certification_chart(market: &MarketSummary, role: Option<&str>) -> ChartSpec {
    let mut spec = ChartSpec::bars(
        titled("Impact of Certifications on Salary", role),
        "Certification",
        "Average Salary ($)",
        Orientation::Vertical,
    );
    let impact = &market.certification_impact;
    if let Some(mean) = impact.with_certifications {
        spec.push("With Certifications", mean);
    }
    if let Some(mean) = impact.without_certifications {
        spec.push("Without Certifications", mean);
    }
    spec
}

pub fn skill_gap_chart(gap: &SkillGapReport, role: Option<&str>) -> ChartSpec {
    let mut spec = ChartSpec::bars(
        titled("Skill Gap Analysis", role),
        "Skill",
        "Demand (% of job listings)",
        Orientation::Horizontal,
    );
    for entry in &gap.skills {
        spec.push(title_case(&entry.skill), entry.demand_percentage);
    }
    spec.highlights = Some(Highlights {
        flags: gap.skills.iter().map(|entry| entry.has_skill).collect(),
        on_label: "Skills You Have".to_string(),
        off_label: "Skills to Learn".to_string(),
    });
    spec
}

const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);
const HAVE_COLOR: RGBColor = RGBColor(144, 238, 144);
const LEARN_COLOR: RGBColor = RGBColor(240, 128, 128);
const MARKER_COLOR: RGBColor = RGBColor(220, 20, 60);

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Draws PNG bar charts with plotters' bitmap backend.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn bar_color(spec: &ChartSpec, index: usize) -> RGBColor {
        match &spec.highlights {
            Some(h) if h.flags.get(index).copied().unwrap_or(false) => HAVE_COLOR,
            Some(_) => LEARN_COLOR,
            None => BAR_COLOR,
        }
    }

    fn draw_vertical(&self, spec: &ChartSpec, path: &Path) -> DrawResult<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = spec.len();
        let top = value_ceiling(&spec.values);
        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..top)?;

        let labels = &spec.labels;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|v| segment_label(labels, v))
            .x_desc(spec.category_label.as_str())
            .y_desc(spec.value_label.as_str())
            .draw()?;

        chart.draw_series(spec.values.iter().enumerate().map(|(i, v)| {
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
                Self::bar_color(spec, i).filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))?;

        chart.draw_series(spec.values.iter().enumerate().map(|(i, v)| {
            Text::new(
                format_value(*v),
                (SegmentValue::CenterOf(i), *v),
                ("sans-serif", 14).into_font(),
            )
        }))?;

        if let Some(marker) = &spec.marker {
            if let Some(value) = spec.values.get(marker.index) {
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (SegmentValue::CenterOf(marker.index), *value),
                        8,
                        MARKER_COLOR.filled(),
                    )))?
                    .label(marker.label.as_str())
                    .legend(|(x, y)| Circle::new((x, y), 5, MARKER_COLOR.filled()));

                chart
                    .configure_series_labels()
                    .border_style(BLACK)
                    .background_style(WHITE.mix(0.8))
                    .draw()?;
            }
        }

        root.present()?;
        Ok(())
    }

    fn draw_horizontal(&self, spec: &ChartSpec, path: &Path) -> DrawResult<()> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = spec.len();
        let right = value_ceiling(&spec.values);
        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(160)
            .build_cartesian_2d(0f64..right, (0..n).into_segmented())?;

        // First entry drawn at the top
        let labels: Vec<String> = spec.labels.iter().rev().cloned().collect();
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&|v| segment_label(&labels, v))
            .x_desc(spec.value_label.as_str())
            .draw()?;

        match &spec.highlights {
            Some(highlights) => {
                let (have, learn): (Vec<usize>, Vec<usize>) =
                    (0..n).partition(|i| highlights.flags.get(*i).copied().unwrap_or(false));

                chart
                    .draw_series(have.iter().map(|&i| horizontal_bar(spec, i)))?
                    .label(highlights.on_label.as_str())
                    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], HAVE_COLOR.filled()));
                chart
                    .draw_series(learn.iter().map(|&i| horizontal_bar(spec, i)))?
                    .label(highlights.off_label.as_str())
                    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], LEARN_COLOR.filled()));

                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::LowerRight)
                    .border_style(BLACK)
                    .background_style(WHITE.mix(0.8))
                    .draw()?;
            }
            None => {
                chart.draw_series((0..n).map(|i| horizontal_bar(spec, i)))?;
            }
        }

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, spec: &ChartSpec, output_path: &Path) -> Result<PathBuf> {
        if spec.is_empty() {
            return Err(CareerMatchError::Chart(format!("'{}' has no data to plot", spec.title)));
        }
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let drawn = match spec.orientation {
            Orientation::Vertical => self.draw_vertical(spec, output_path),
            Orientation::Horizontal => self.draw_horizontal(spec, output_path),
        };
        drawn.map_err(|e| CareerMatchError::Chart(format!("Failed to draw '{}': {}", spec.title, e)))?;

        debug!("Rendered chart '{}' to {}", spec.title, output_path.display());
        Ok(output_path.to_path_buf())
    }
}

fn horizontal_bar(spec: &ChartSpec, index: usize) -> Rectangle<(f64, SegmentValue<usize>)> {
    let row = spec.len() - 1 - index;
    let value = spec.values.get(index).copied().unwrap_or_default();
    let mut bar = Rectangle::new(
        [(0.0, SegmentValue::Exact(row)), (value, SegmentValue::Exact(row + 1))],
        PlottersRenderer::bar_color(spec, index).filled(),
    );
    bar.set_margin(4, 4, 0, 0);
    bar
}

fn segment_label(labels: &[String], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => labels.get(*i).cloned().unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

fn value_ceiling(values: &[f64]) -> f64 {
    let max = values.iter().copied().filter(|v| v.is_finite()).fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

fn format_value(value: f64) -> String {
    if value >= 1000.0 {
        format!("{:.0}", value)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
