//! # Scanner Module
//!
//! Rebuilds trips from the photo tree.
//!
//! ## Layout
//! ```text
//! <root>/<year>/<country>[_<country>...]/<city>_<n>.<ext>
//! ```
//! Only the two folder levels are walked; photos are read from the country
//! folder itself.
//!
//! ## Example
//! ```rust,ignore
//! use travel_photo_scanner::core::scanner::{ScanConfig, TripScanner, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(Path::new("images/photo"))?;
//! ```

mod filter;
mod walker;

pub use filter::{ImageFilter, DEFAULT_EXTENSIONS};
pub use walker::{ScanConfig, WalkDirScanner};

use crate::core::trip::Trip;
use crate::error::ScanError;
use std::collections::BTreeMap;
use std::path::Path;

/// Result of a scan operation
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Trips keyed by `year_country`
    pub trips: BTreeMap<String, Trip>,
    /// Number of photo files accepted
    pub photos_found: usize,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for trip scanners
///
/// Implement this trait to feed the pipeline from somewhere other than disk.
pub trait TripScanner {
    /// Walk `root` and rebuild every trip found under it
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError>;
}
