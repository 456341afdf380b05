//! # trip-scan CLI
//!
//! Compares the travel photo folders with the site manifest and writes a
//! template of proposed changes.
//!
//! ## Usage
//! ```bash
//! trip-scan
//! trip-scan --root images/photo --manifest data/travels.json --output json
//! ```

mod cli;

use travel_photo_scanner::Result;

fn main() -> Result<()> {
    cli::run()
}
