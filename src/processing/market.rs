//! Market distributions over a role-filtered subset of listings

use crate::config::AnalysisConfig;
use crate::dataset::{EducationLevel, Listing, RoleFilter};
use crate::error::{CareerMatchError, Result};
use crate::processing::frequency::FrequencyTable;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open experience range `(lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceBucket {
    pub lower: u32,
    pub upper: u32,
}

pub const EXPERIENCE_BUCKETS: [ExperienceBucket; 4] = [
    ExperienceBucket { lower: 0, upper: 2 },
    ExperienceBucket { lower: 2, upper: 5 },
    ExperienceBucket { lower: 5, upper: 8 },
    ExperienceBucket { lower: 8, upper: 100 },
];

impl ExperienceBucket {
    pub fn contains(&self, years: f64) -> bool {
        years > f64::from(self.lower) && years <= f64::from(self.upper)
    }

    /// The bucket holding `years`. Zero and anything above 100 fall outside every bucket.
    pub fn containing(years: f64) -> Option<Self> {
        EXPERIENCE_BUCKETS.into_iter().find(|b| b.contains(years))
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExperienceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}]", self.lower, self.upper)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSalary {
    pub bucket: ExperienceBucket,
    pub label: String,
    pub listings: usize,
    pub mean_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Mean salary split by certification flag. A side with no listings is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationImpact {
    pub with_certifications: Option<f64>,
    pub without_certifications: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub role_filter: Option<String>,
    pub total_jobs: usize,
    pub state_distribution: Vec<CategoryCount>,
    /// Only buckets with at least one listing, in bucket order.
    pub salary_by_experience: Vec<BucketSalary>,
    pub average_salary: f64,
    pub education_distribution: Vec<CategoryCount>,
    pub certification_impact: CertificationImpact,
}

impl MarketSummary {
    pub fn bucket_salary(&self, bucket: &ExperienceBucket) -> Option<f64> {
        self.salary_by_experience
            .iter()
            .find(|b| &b.bucket == bucket)
            .map(|b| b.mean_salary)
    }
}

#[derive(Debug, Clone)]
pub struct MarketAggregator {
    region_top_n: usize,
}

impl Default for MarketAggregator {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl MarketAggregator {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            region_top_n: config.region_top_n,
        }
    }

    pub fn analyze_market(&self, listings: &[Listing], filter: &RoleFilter) -> Result<MarketSummary> {
        if listings.is_empty() {
            return Err(CareerMatchError::NoData);
        }

        let jobs = filter.apply(listings);
        if jobs.is_empty() {
            return Err(CareerMatchError::InsufficientData {
                role: filter.pattern().map(str::to_string),
            });
        }

        let regions: FrequencyTable<&str> = jobs.iter().filter_map(|j| j.state_code.as_deref()).collect();
        let state_distribution = regions
            .most_common(self.region_top_n)
            .into_iter()
            .map(|(label, count)| CategoryCount {
                label: label.to_string(),
                count,
            })
            .collect();

        let salary_by_experience = EXPERIENCE_BUCKETS
            .iter()
            .filter_map(|bucket| {
                let salaries: Vec<f64> = jobs
                    .iter()
                    .filter(|j| bucket.contains(j.years_experience))
                    .map(|j| j.current_salary)
                    .collect();
                mean(&salaries).map(|mean_salary| BucketSalary {
                    bucket: *bucket,
                    label: bucket.label(),
                    listings: salaries.len(),
                    mean_salary,
                })
            })
            .collect();

        let all_salaries: Vec<f64> = jobs.iter().map(|j| j.current_salary).collect();
        let average_salary = mean(&all_salaries).unwrap_or_default();

        let education: FrequencyTable<EducationLevel> = jobs.iter().map(|j| j.education_level).collect();
        let education_distribution = education
            .ranked()
            .into_iter()
            .map(|(level, count)| CategoryCount {
                label: level.to_string(),
                count,
            })
            .collect();

        let certification_impact = CertificationImpact {
            with_certifications: mean_where(&jobs, |j| j.has_certifications),
            without_certifications: mean_where(&jobs, |j| !j.has_certifications),
        };

        info!(
            "Market summary over {} listings (role filter: {})",
            jobs.len(),
            filter.pattern().unwrap_or("none")
        );

        Ok(MarketSummary {
            role_filter: filter.pattern().map(str::to_string),
            total_jobs: jobs.len(),
            state_distribution,
            salary_by_experience,
            average_salary,
            education_distribution,
            certification_impact,
        })
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

fn mean_where(jobs: &[&Listing], predicate: impl Fn(&Listing) -> bool) -> Option<f64> {
    let salaries: Vec<f64> = jobs
        .iter()
        .filter(|j| predicate(j))
        .map(|j| j.current_salary)
        .collect();
    mean(&salaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LocationPreference;

    fn listing(role: &str, years: f64, salary: f64, cert: bool, state: Option<&str>) -> Listing {
        Listing {
            preferred_role: role.to_string(),
            skills: vec!["python".to_string()],
            years_experience: years,
            current_salary: salary,
            education_level: EducationLevel::Bachelor,
            has_certifications: cert,
            location_preference: LocationPreference::Remote,
            state_code: state.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_dataset_is_no_data() {
        let result = MarketAggregator::default().analyze_market(&[], &RoleFilter::any());
        assert!(matches!(result, Err(CareerMatchError::NoData)));
    }

    #[test]
    fn test_unmatched_role_is_insufficient_data() {
        let listings = vec![listing("Backend Developer", 3.0, 90000.0, true, Some("CA"))];
        let result = MarketAggregator::default()
            .analyze_market(&listings, &RoleFilter::new(Some("Astronaut")));
        match result {
            Err(CareerMatchError::InsufficientData { role }) => assert_eq!(role.as_deref(), Some("Astronaut")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_bucket_edges() {
        assert_eq!(ExperienceBucket::containing(0.0), None);
        assert_eq!(ExperienceBucket::containing(2.0), Some(EXPERIENCE_BUCKETS[0]));
        assert_eq!(ExperienceBucket::containing(2.5), Some(EXPERIENCE_BUCKETS[1]));
        assert_eq!(ExperienceBucket::containing(100.0), Some(EXPERIENCE_BUCKETS[3]));
        assert_eq!(ExperienceBucket::containing(100.5), None);
        assert_eq!(EXPERIENCE_BUCKETS[3].label(), "(8, 100]");
    }

    #[test]
    fn test_bucket_means_skip_empty_and_zero() {
        let listings = vec![
            listing("Dev", 0.0, 10_000_000.0, false, None),
            listing("Dev", 2.0, 60000.0, false, None),
            listing("Dev", 1.0, 40000.0, false, None),
            listing("Dev", 10.0, 150000.0, true, None),
        ];
        let summary = MarketAggregator::default()
            .analyze_market(&listings, &RoleFilter::any())
            .unwrap();

        assert_eq!(summary.salary_by_experience.len(), 2);
        assert_eq!(summary.bucket_salary(&EXPERIENCE_BUCKETS[0]), Some(50000.0));
        assert_eq!(summary.bucket_salary(&EXPERIENCE_BUCKETS[1]), None);
        assert_eq!(summary.bucket_salary(&EXPERIENCE_BUCKETS[3]), Some(150000.0));
        assert_eq!(summary.state_distribution.len(), 0);
    }

    #[test]
    fn test_distributions_and_certification_means() {
        let listings = vec![
            listing("Backend Developer", 3.0, 90000.0, true, Some("CA")),
            listing("Backend Engineer", 4.0, 110000.0, false, Some("NY")),
            listing("backend developer", 6.0, 130000.0, true, Some("NY")),
            listing("Data Scientist", 6.0, 200000.0, true, Some("WA")),
        ];
        let summary = MarketAggregator::default()
            .analyze_market(&listings, &RoleFilter::new(Some("backend")))
            .unwrap();

        assert_eq!(summary.total_jobs, 3);
        assert_eq!(summary.state_distribution[0], CategoryCount { label: "NY".into(), count: 2 });
        assert_eq!(summary.state_distribution[1], CategoryCount { label: "CA".into(), count: 1 });
        assert_eq!(summary.average_salary, 110000.0);
        assert_eq!(summary.certification_impact.with_certifications, Some(110000.0));
        assert_eq!(summary.certification_impact.without_certifications, Some(110000.0));
        assert_eq!(summary.education_distribution[0].count, 3);
    }

    #[test]
    fn test_region_histogram_bounded() {
        let states = ["AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID"];
        let listings: Vec<Listing> = states
            .iter()
            .map(|s| listing("Dev", 3.0, 80000.0, false, Some(*s)))
            .collect();
        let summary = MarketAggregator::default()
            .analyze_market(&listings, &RoleFilter::any())
            .unwrap();

        assert_eq!(summary.state_distribution.len(), 10);
        assert_eq!(summary.state_distribution[0].label, "AL");
        assert!(summary.state_distribution.iter().all(|c| c.count <= summary.total_jobs));
        assert_eq!(summary.certification_impact.with_certifications, None);
    }
}
