//! Role filtering over the listing set

use crate::dataset::listing::Listing;
use log::debug;
use regex::{Regex, RegexBuilder};

/// Case-insensitive match on `preferred_role`.
///
/// The pattern is tried as a regex first; if it does not compile it is
/// matched as a literal substring instead. A blank pattern matches every
/// listing.
#[derive(Debug, Clone)]
pub struct RoleFilter {
    pattern: Option<String>,
    regex: Option<Regex>,
}

impl RoleFilter {
    pub fn new(pattern: Option<&str>) -> Self {
        let pattern = pattern.map(str::trim).filter(|p| !p.is_empty());

        let regex = pattern.map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .or_else(|e| {
                    debug!("Role pattern {:?} is not a valid regex ({}), matching literally", p, e);
                    RegexBuilder::new(&regex::escape(p))
                        .case_insensitive(true)
                        .build()
                })
        });

        // An escaped literal always compiles; keep the filter open if it somehow does not.
        let regex = regex.and_then(|r| r.ok());

        Self {
            pattern: pattern.map(str::to_string),
            regex,
        }
    }

    pub fn any() -> Self {
        Self::new(None)
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.regex.is_some()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(&listing.preferred_role),
            None => true,
        }
    }

    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }
}
