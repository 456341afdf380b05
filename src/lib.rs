//! # Travel Photo Scanner
//!
//! Keeps a travel-photo website's trip manifest in step with the photo folders on disk.
//!
//! ## Core Philosophy
//! - **Never rewrite the manifest** - Only propose changes in a separate template
//! - **Show WHAT changed** - Every proposed edit says which trip and why
//! - **Keep going** - A broken manifest or a failed write never loses the scan
//!
//! ## Architecture
//! - `core` - Walker, manifest loader, classifier and template writer
//! - `error` - Error taxonomy
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{Result, TripScanError};

/// Initialize tracing for the binary
///
/// `RUST_LOG` wins when set; otherwise logs at `info`, or `debug` when verbose.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();

    // A second initialization (e.g. from tests) keeps the first subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}
