//! # Core Module
//!
//! The scan-and-compare engine, free of any terminal concerns.
//!
//! ## Modules
//! - `trip` - Trip model and city derivation
//! - `scanner` - Rebuilds trips from the photo tree
//! - `manifest` - Loads and indexes the published manifest
//! - `differ` - Classifies trips into change categories
//! - `reporter` - Writes the review template and last-scan stamp
//! - `pipeline` - Orchestrates the full run

pub mod differ;
pub mod manifest;
pub mod pipeline;
pub mod reporter;
pub mod scanner;
pub mod trip;

// Re-export commonly used types
pub use differ::{classify, ScanReport, ScanSummary};
pub use manifest::{Manifest, ManifestRecord};
pub use pipeline::{Pipeline, PipelineResult};
pub use reporter::{ReportConfig, Template};
pub use trip::Trip;
