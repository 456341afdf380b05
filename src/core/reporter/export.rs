//! File output for the template and the last-scan stamp.
//!
//! Each write is independent: a failure is returned to the caller, which logs
//! it and moves on to the next file.

use super::{render_template, ReportConfig, Template};
use crate::error::ReportError;
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Fixed-offset clock for all scan timestamps
///
/// An out-of-range offset falls back to UTC.
pub fn scan_clock(utc_offset_hours: i32) -> FixedOffset {
    utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            warn!(utc_offset_hours, "Invalid UTC offset, using UTC");
            Utc.fix()
        })
}

/// `2026/10/19 09:30:00 (UTC+08:00)`
pub fn format_last_scan<Tz>(scanned_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    scanned_at.format("%Y/%m/%d %H:%M:%S (UTC%:z)").to_string()
}

/// Render and write the template, creating parent folders as needed
pub fn write_template_file(
    template: &Template,
    path: &Path,
    config: &ReportConfig,
) -> Result<(), ReportError> {
    let text = render_template(template, config)?;
    write_text(path, &text)?;
    info!(path = %path.display(), "Template written");
    Ok(())
}

/// Write the single-line last-scan stamp
pub fn write_last_scan_file(
    path: &Path,
    scanned_at: &DateTime<FixedOffset>,
) -> Result<(), ReportError> {
    let line = format_last_scan(scanned_at);
    write_text(path, &format!("{line}\n"))?;
    info!(path = %path.display(), at = %line, "Last scan time recorded");
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<(), ReportError> {
    let to_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, text).map_err(to_error)
}
