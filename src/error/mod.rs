//! # Error Module
//!
//! Error types for the travel photo scanner.
//!
//! ## Recovery Policy
//! - **Scan errors** - a missing root ends the run; unreadable entries are skipped
//! - **Manifest errors** - always recovered as an empty manifest
//! - **Report errors** - logged per file, the other outputs are still written

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum TripScanError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Errors that occur while walking the photo tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Photo directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while reading the trip manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest is not valid JSON: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that occur while writing the template or last-scan file
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize template: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to render template: {0}")]
    Render(#[source] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, TripScanError>;
