//! # CLI Module
//!
//! Command-line interface for the travel photo scanner.
//!
//! ## Usage
//! ```bash
//! # Scan with the site's default layout
//! trip-scan
//!
//! # Custom locations
//! trip-scan --root ~/site/images/photo --manifest ~/site/data/travels.json
//!
//! # Print the template instead of a summary, write nothing
//! trip-scan --output json --dry-run
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use std::path::PathBuf;
use travel_photo_scanner::core::pipeline::{
    Pipeline, PipelineResult, DEFAULT_LAST_SCAN, DEFAULT_MANIFEST, DEFAULT_ROOT, DEFAULT_TEMPLATE,
};
use travel_photo_scanner::core::reporter::{
    render_template, ReportConfig, DEFAULT_INLINE_WIDTH, DEFAULT_UTC_OFFSET_HOURS,
};
use travel_photo_scanner::error::Result;
use travel_photo_scanner::TripScanError;

/// Trip Scan - propose travel manifest updates from the photo folders
#[derive(Parser, Debug)]
#[command(name = "trip-scan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root of the <year>/<country> photo tree
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Published trip manifest (read only)
    #[arg(long, default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Where to write the proposed changes
    #[arg(long, default_value = DEFAULT_TEMPLATE)]
    template: PathBuf,

    /// Where to record the scan time
    #[arg(long, default_value = DEFAULT_LAST_SCAN)]
    last_scan: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Write every array element on its own line
    #[arg(long)]
    no_compact: bool,

    /// Include hidden files and folders
    #[arg(long)]
    include_hidden: bool,

    /// Hours east of UTC for timestamps
    #[arg(long, default_value_t = DEFAULT_UTC_OFFSET_HOURS, allow_hyphen_values = true)]
    utc_offset: i32,

    /// Classify only, do not write any file
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary with colors
    Pretty,
    /// The template JSON on stdout
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    travel_photo_scanner::init_tracing(cli.verbose);

    let report_config = ReportConfig {
        compact_arrays: !cli.no_compact,
        max_inline_width: DEFAULT_INLINE_WIDTH,
        utc_offset_hours: cli.utc_offset,
    };

    let pipeline = Pipeline::builder()
        .root(cli.root)
        .manifest_path(cli.manifest)
        .template_path(cli.template)
        .last_scan_path(cli.last_scan)
        .include_hidden(cli.include_hidden)
        .report_config(report_config.clone())
        .dry_run(cli.dry_run)
        .build();

    let term = Term::stderr();

    let result = match pipeline.run() {
        Ok(result) => result,
        Err(TripScanError::Scan(e)) => {
            // Already logged; a missing tree is not a failure of the tool
            term.write_line(&format!("{} {}", style("✗").red().bold(), e))
                .ok();
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    match cli.output {
        OutputFormat::Pretty => print_pretty_results(&term, &result, cli.verbose),
        OutputFormat::Json => {
            let text = render_template(&result.template, &report_config)?;
            println!("{}", text.trim_end());
        }
    }

    Ok(())
}

fn print_pretty_results(term: &Term, result: &PipelineResult, verbose: bool) {
    let report = &result.report;
    let summary = report.summary();

    term.write_line("").ok();
    term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} trips, {} photos scanned in {:.1}s",
        style(summary.total_scanned).cyan(),
        style(result.photos_found).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();

    let rows = [
        ("new trips", summary.new_trips),
        ("updated trips", summary.updated_trips),
        ("trips with deleted photos", summary.trips_with_deleted_photos),
        ("trips needing a city fix", summary.trips_need_city_fix),
        ("deleted trips", summary.deleted_trips),
        ("unchanged", summary.unchanged),
    ];
    for (label, count) in rows {
        let count = if count > 0 && label != "unchanged" {
            style(count).yellow()
        } else {
            style(count).dim()
        };
        term.write_line(&format!("  {} {}", count, label)).ok();
    }
    term.write_line("").ok();

    if !report.has_changes() {
        term.write_line(&format!("  {} Manifest is up to date", style("✓").green()))
            .ok();
    } else {
        for trip in &report.new_trips {
            change_line(
                term,
                "+",
                &trip.key,
                &trip.display_name,
                &format!("{} photos", trip.photo_count),
            );
        }
        for trip in &report.updated_trips {
            change_line(
                term,
                "~",
                &trip.key,
                &trip.display_name,
                &format!("+{} photos", trip.new_photos.len()),
            );
            if verbose {
                detail_line(term, &trip.new_photos);
            }
        }
        for trip in &report.trips_with_deleted_photos {
            change_line(
                term,
                "-",
                &trip.key,
                &trip.display_name,
                &format!("-{} photos", trip.deleted_photos.len()),
            );
            if verbose {
                detail_line(term, &trip.deleted_photos);
            }
        }
        for trip in &report.trips_need_city_fix {
            change_line(
                term,
                "?",
                &trip.key,
                &trip.display_name,
                &format!("city → {}", trip.added_cities.join(", ")),
            );
        }
        for trip in &report.deleted_trips {
            change_line(
                term,
                "✗",
                &trip.key,
                &trip.display_name,
                trip.reason.description(),
            );
        }
    }
    term.write_line("").ok();

    for error in &result.errors {
        term.write_line(&format!("  {} {}", style("!").red(), error)).ok();
    }

    if result.written.is_empty() {
        term.write_line(&format!("{}", style("No files were written.").dim()))
            .ok();
    } else {
        for path in &result.written {
            term.write_line(&format!("  {} {}", style("wrote").dim(), path.display()))
                .ok();
        }
        term.write_line(&format!(
            "{}",
            style("Remember: the manifest was not changed. Merge the template by hand.").dim()
        ))
        .ok();
    }
}

fn change_line(term: &Term, marker: &str, key: &str, name: &str, detail: &str) {
    let marker = match marker {
        "+" => style(marker).green(),
        "✗" | "-" => style(marker).red(),
        _ => style(marker).yellow(),
    };
    term.write_line(&format!(
        "  {} {} {} {}",
        marker,
        style(key).bold(),
        name,
        style(format!("({})", detail)).dim()
    ))
    .ok();
}

fn detail_line(term: &Term, photos: &[String]) {
    term.write_line(&format!("      {}", style(photos.join(", ")).dim()))
        .ok();
}
