//! # Reporter Module
//!
//! Turns a [`ScanReport`] into the review template and the last-scan stamp.
//!
//! The template is meant to be read and merged by hand, so it is written with
//! short string arrays on one line (see [`compact`]). The classifier output
//! itself stays a plain value; all layout decisions live here.

pub mod compact;
mod export;

pub use export::{format_last_scan, scan_clock, write_last_scan_file, write_template_file};

use crate::core::differ::{
    CityFix, DeletedTrip, NewTrip, ScanReport, ScanSummary, TripWithDeletedPhotos, UpdatedTrip,
};
use crate::error::ReportError;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::Serialize;
use std::path::Path;

/// Default column limit for inline string arrays
pub const DEFAULT_INLINE_WIDTH: usize = 100;

/// Default offset of the site's home timezone (Taipei, no DST)
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// How reports are rendered
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Keep short string arrays on one line
    pub compact_arrays: bool,
    /// Column limit for a line holding an inline array, indentation and key included
    pub max_inline_width: usize,
    /// Fixed offset used for every timestamp
    pub utc_offset_hours: i32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            compact_arrays: true,
            max_inline_width: DEFAULT_INLINE_WIDTH,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

/// Header of the template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanHeader {
    /// RFC 3339 time of the scan
    pub timestamp: String,
    /// Photo root that was scanned
    pub root: String,
    pub summary: ScanSummary,
}

/// The proposed-changes document written for manual review
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub scan_result: ScanHeader,
    pub new_trips: Vec<NewTrip>,
    pub updated_trips: Vec<UpdatedTrip>,
    pub deleted_trips: Vec<DeletedTrip>,
    pub trips_with_deleted_photos: Vec<TripWithDeletedPhotos>,
    pub trips_need_city_fix: Vec<CityFix>,
}

impl Template {
    /// Build the template for one scan
    pub fn new(report: &ScanReport, root: &Path, scanned_at: DateTime<FixedOffset>) -> Self {
        Self {
            scan_result: ScanHeader {
                timestamp: scanned_at.to_rfc3339_opts(SecondsFormat::Secs, false),
                root: root.display().to_string(),
                summary: report.summary(),
            },
            new_trips: report.new_trips.clone(),
            updated_trips: report.updated_trips.clone(),
            deleted_trips: report.deleted_trips.clone(),
            trips_with_deleted_photos: report.trips_with_deleted_photos.clone(),
            trips_need_city_fix: report.trips_need_city_fix.clone(),
        }
    }
}

/// Serialize a template using the configured layout
pub fn render_template(template: &Template, config: &ReportConfig) -> Result<String, ReportError> {
    if !config.compact_arrays {
        let mut text = serde_json::to_string_pretty(template)?;
        text.push('\n');
        return Ok(text);
    }

    let value = serde_json::to_value(template)?;
    compact::to_compact_string(&value, config.max_inline_width)
        .map_err(ReportError::Render)
}
