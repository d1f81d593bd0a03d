//! Job listing dataset: record model, CSV loader, role filter

pub mod filter;
pub mod listing;
pub mod loader;

use std::path::{Path, PathBuf};

pub use filter::RoleFilter;
pub use listing::{EducationLevel, Listing, LocationPreference};

/// The read-only listing table shared by every analysis call.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    listings: Vec<Listing>,
    source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings, source: None }
    }

    pub fn with_source(listings: Vec<Listing>, source: PathBuf) -> Self {
        Self {
            listings,
            source: Some(source),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
