//! Pipeline execution implementation.

use crate::core::differ::{classify, ScanReport};
use crate::core::manifest::Manifest;
use crate::core::reporter::{
    scan_clock, write_last_scan_file, write_template_file, ReportConfig, Template,
};
use crate::core::scanner::{ScanConfig, TripScanner, WalkDirScanner};
use crate::error::TripScanError;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

/// Photo root used when none is given
pub const DEFAULT_ROOT: &str = "images/photo";
/// Manifest used when none is given
pub const DEFAULT_MANIFEST: &str = "data/travels.json";
/// Template output used when none is given
pub const DEFAULT_TEMPLATE: &str = "data/travels-template.json";
/// Last-scan stamp used when none is given
pub const DEFAULT_LAST_SCAN: &str = "data/last-scan.txt";

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// Classified changes
    pub report: ScanReport,
    /// The template that was (or would have been) written
    pub template: Template,
    /// Photo files accepted by the scanner
    pub photos_found: usize,
    /// Files actually written
    pub written: Vec<PathBuf>,
    /// Errors encountered (non-fatal)
    pub errors: Vec<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of the `<year>/<country>` photo tree
    pub root: PathBuf,
    /// Manifest to compare against (read only)
    pub manifest_path: PathBuf,
    /// Where the proposed changes go
    pub template_path: PathBuf,
    /// Where the scan time goes
    pub last_scan_path: PathBuf,
    /// Scanner configuration
    pub scan_config: ScanConfig,
    /// Template layout and clock
    pub report_config: ReportConfig,
    /// Classify only, write nothing
    pub dry_run: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            template_path: PathBuf::from(DEFAULT_TEMPLATE),
            last_scan_path: PathBuf::from(DEFAULT_LAST_SCAN),
            scan_config: ScanConfig::default(),
            report_config: ReportConfig::default(),
            dry_run: false,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    scanner: Option<Box<dyn TripScanner>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            scanner: None,
        }
    }

    /// Set the photo root
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Set the manifest to compare against
    pub fn manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.manifest_path = path.into();
        self
    }

    /// Set the template output path
    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_path = path.into();
        self
    }

    /// Set the last-scan stamp path
    pub fn last_scan_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.last_scan_path = path.into();
        self
    }

    /// Include hidden files and folders
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan_config.include_hidden = include;
        self
    }

    /// Set report rendering options
    pub fn report_config(mut self, config: ReportConfig) -> Self {
        self.config.report_config = config;
        self
    }

    /// Skip writing output files
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Replace the filesystem scanner
    pub fn scanner(mut self, scanner: Box<dyn TripScanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        let scanner = self
            .scanner
            .unwrap_or_else(|| Box::new(WalkDirScanner::new(self.config.scan_config.clone())));
        Pipeline {
            config: self.config,
            scanner,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan, compare, and write the review files
pub struct Pipeline {
    config: PipelineConfig,
    scanner: Box<dyn TripScanner>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one scan
    ///
    /// Only a missing photo root is an error; everything else is logged and
    /// collected in [`PipelineResult::errors`].
    pub fn run(&self) -> Result<PipelineResult, TripScanError> {
        let start_time = Instant::now();
        let mut errors = Vec::new();

        // Phase 1: Scanning
        let scan_result = self.scanner.scan(&self.config.root).map_err(|e| {
            error!("{}", e);
            e
        })?;
        errors.extend(scan_result.errors.iter().map(|e| e.to_string()));

        // Phase 2: Comparing
        let manifest = Manifest::load(&self.config.manifest_path);
        let report = classify(&scan_result.trips, &manifest);

        // Phase 3: Reporting
        let clock = scan_clock(self.config.report_config.utc_offset_hours);
        let scanned_at = Utc::now().with_timezone(&clock);
        let template = Template::new(&report, &self.config.root, scanned_at);

        let mut written = Vec::new();
        if self.config.dry_run {
            info!("Dry run, no files written");
        } else {
            match write_template_file(
                &template,
                &self.config.template_path,
                &self.config.report_config,
            ) {
                Ok(()) => written.push(self.config.template_path.clone()),
                Err(e) => {
                    warn!("{}", e);
                    errors.push(e.to_string());
                }
            }

            match write_last_scan_file(&self.config.last_scan_path, &scanned_at) {
                Ok(()) => written.push(self.config.last_scan_path.clone()),
                Err(e) => {
                    warn!("{}", e);
                    errors.push(e.to_string());
                }
            }
        }

        Ok(PipelineResult {
            report,
            template,
            photos_found: scan_result.photos_found,
            written,
            errors,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}
