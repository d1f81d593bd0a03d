//! CSV loading and cleaning of job listings

use crate::dataset::listing::{parse_skill_field, EducationLevel, Listing, LocationPreference};
use crate::dataset::Dataset;
use crate::error::{CareerMatchError, Result};
use crate::processing::frequency::FrequencyTable;
use log::{debug, info, warn};
use serde::Deserialize;
use std::hash::Hash;
use std::io::Read;
use std::path::Path;

pub const EXPERIENCE_RANGE: (f64, f64) = (0.0, 40.0);
pub const SALARY_RANGE: (f64, f64) = (20_000.0, 500_000.0);

/// One CSV row before cleaning. Unknown columns are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawListing {
    #[serde(default)]
    preferred_role: Option<String>,
    #[serde(default)]
    technical_skills: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    years_experience: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    current_salary: Option<f64>,
    #[serde(default)]
    education_level: Option<String>,
    #[serde(default)]
    has_certifications: Option<String>,
    #[serde(default)]
    location_preference: Option<String>,
    #[serde(default)]
    it_state: Option<String>,
}

/// Load and clean the listings file at `path`.
pub fn load_listings(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(CareerMatchError::InvalidInput(format!(
            "Listings file does not exist: {}",
            path.display()
        )));
    }

    info!("Loading job listings from {}", path.display());
    let file = std::fs::File::open(path)?;
    let listings = read_listings(file)?;
    info!("Loaded {} job listings", listings.len());

    Ok(Dataset::with_source(listings, path.to_path_buf()))
}

/// Read and clean listings from any CSV source with a header row.
pub fn read_listings<R: Read>(reader: R) -> Result<Vec<Listing>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == "technical_skills") {
        warn!("Listings file has no technical_skills column; every listing will be skill-less");
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in reader.deserialize::<RawListing>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                debug!("Skipping unreadable row {}: {}", line + 2, e);
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} unreadable listing rows", skipped);
    }

    Ok(clean(rows))
}

/// Fill gaps and clamp values the way the preprocessing step does.
fn clean(rows: Vec<RawListing>) -> Vec<Listing> {
    let experience_fill = median(rows.iter().filter_map(|r| r.years_experience)).unwrap_or(0.0);
    let salary_fill = median(rows.iter().filter_map(|r| r.current_salary)).unwrap_or(SALARY_RANGE.0);

    let role_fill = mode(rows.iter().filter_map(|r| non_blank(&r.preferred_role)))
        .map(str::to_string)
        .unwrap_or_default();
    let location_fill = mode(
        rows.iter()
            .filter_map(|r| non_blank(&r.location_preference))
            .filter_map(LocationPreference::parse),
    )
    .unwrap_or(LocationPreference::Remote);

    let mut fixed_education = 0usize;
    let listings: Vec<Listing> = rows
        .into_iter()
        .map(|row| {
            let education_level = match non_blank(&row.education_level).and_then(EducationLevel::parse) {
                Some(level) => level,
                None => {
                    fixed_education += 1;
                    EducationLevel::default()
                }
            };

            Listing {
                preferred_role: non_blank(&row.preferred_role)
                    .map(str::to_string)
                    .unwrap_or_else(|| role_fill.clone()),
                skills: row
                    .technical_skills
                    .as_deref()
                    .map(parse_skill_field)
                    .unwrap_or_default(),
                years_experience: clamp_finite(
                    row.years_experience.unwrap_or(experience_fill),
                    EXPERIENCE_RANGE,
                    experience_fill,
                ),
                current_salary: clamp_finite(
                    row.current_salary.unwrap_or(salary_fill),
                    SALARY_RANGE,
                    salary_fill,
                ),
                education_level,
                has_certifications: non_blank(&row.has_certifications)
                    .and_then(parse_flag)
                    .unwrap_or(false),
                location_preference: non_blank(&row.location_preference)
                    .and_then(LocationPreference::parse)
                    .unwrap_or(location_fill),
                state_code: non_blank(&row.it_state).map(str::to_uppercase),
            }
        })
        .collect();

    if fixed_education > 0 {
        debug!("Defaulted {} unrecognised education levels to Bachelor's", fixed_education);
    }

    listings
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "t" => Some(true),
        "false" | "0" | "no" | "n" | "f" => Some(false),
        _ => None,
    }
}

fn clamp_finite(value: f64, (lo, hi): (f64, f64), fallback: f64) -> f64 {
    let value = if value.is_finite() { value } else { fallback };
    value.clamp(lo, hi)
}

fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut values: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Most frequent value; ties go to the value seen first.
fn mode<T: Eq + Hash + Clone>(values: impl Iterator<Item = T>) -> Option<T> {
    values
        .collect::<FrequencyTable<T>>()
        .most_common(1)
        .into_iter()
        .next()
        .map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "id,years_experience,technical_skills,preferred_role,current_salary,education_level,has_certifications,location_preference,it_state";

    fn read(body: &str) -> Vec<Listing> {
        let csv = format!("{}\n{}", HEADER, body);
        read_listings(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_reads_well_formed_rows() {
        let listings = read(
            "1,3,\"Python, SQL\",Backend Developer,90000,Bachelor's,True,Remote,CA\n\
             2,7.5,\"React,CSS\",Frontend Developer,110000,Master's,False,On-site,ny\n",
        );

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].skills, vec!["python", "sql"]);
        assert_eq!(listings[0].years_experience, 3.0);
        assert!(listings[0].has_certifications);
        assert_eq!(listings[0].state_code.as_deref(), Some("CA"));
        assert_eq!(listings[1].education_level, EducationLevel::Master);
        assert_eq!(listings[1].location_preference, LocationPreference::OnSite);
        assert_eq!(listings[1].state_code.as_deref(), Some("NY"));
    }

    #[test]
    fn test_fills_and_clamps() {
        let listings = read(
            "1,,Python,Data Scientist,,PhD,,Hybrid,\n\
             2,2,Python,Data Scientist,60000,Doctorate,no,,TX\n\
             3,55,Python,,900000,High School,yes,Hybrid,TX\n\
             4,4,,Backend Developer,80000,Associate's,1,Remote,WA\n",
        );

        // experience median of [2, 55, 4] = 4; salary median of [60000, 900000, 80000] = 80000
        assert_eq!(listings[0].years_experience, 4.0);
        assert_eq!(listings[0].current_salary, 80000.0);
        assert!(!listings[0].has_certifications);
        assert_eq!(listings[0].state_code, None);

        assert_eq!(listings[1].education_level, EducationLevel::Bachelor);
        assert_eq!(listings[1].location_preference, LocationPreference::Hybrid);

        assert_eq!(listings[2].years_experience, 40.0);
        assert_eq!(listings[2].current_salary, 500_000.0);
        assert_eq!(listings[2].preferred_role, "Data Scientist");

        assert!(listings[3].skills.is_empty());
        assert!(listings[3].has_certifications);
    }

    #[test]
    fn test_unparsable_numbers_become_missing() {
        let listings = read(
            "1,abc,Go,SRE,70000,PhD,false,Remote,OR\n\
             2,6,Go,SRE,n/a,PhD,false,Remote,OR\n",
        );
        assert_eq!(listings[0].years_experience, 6.0);
        assert_eq!(listings[1].current_salary, 70000.0);
    }

    #[test]
    fn test_load_missing_file_is_invalid_input() {
        let err = load_listings(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, CareerMatchError::InvalidInput(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "{}", HEADER).unwrap();
        writeln!(f, "1,3,\"Python,SQL\",Backend Developer,90000,Bachelor's,True,Remote,CA").unwrap();

        let dataset = load_listings(f.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.source(), Some(f.path()));
    }

    #[test]
    fn test_mode_prefers_first_seen_on_tie() {
        assert_eq!(mode(["b", "a", "a", "b"].into_iter()), Some("b"));
        assert_eq!(mode(["b", "a", "a"].into_iter()), Some("a"));
        assert_eq!(mode(std::iter::empty::<&str>()), None);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median([3.0, 1.0, 2.0].into_iter()), Some(2.0));
        assert_eq!(median([4.0, 1.0, 2.0, 3.0].into_iter()), Some(2.5));
        assert_eq!(median(std::iter::empty()), None);
    }
}
