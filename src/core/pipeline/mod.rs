//! # Pipeline Module
//!
//! Orchestrates one maintenance run.
//!
//! ## Pipeline Stages
//! 1. **Scan** - Rebuild trips from the `<year>/<country>` photo tree
//! 2. **Compare** - Load the manifest and classify every trip
//! 3. **Report** - Write the review template and the last-scan stamp
//!
//! The manifest itself is never written.

mod executor;

pub use executor::{
    Pipeline, PipelineBuilder, PipelineConfig, PipelineResult, DEFAULT_LAST_SCAN,
    DEFAULT_MANIFEST, DEFAULT_ROOT, DEFAULT_TEMPLATE,
};
