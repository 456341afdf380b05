//! Integration tests for the pipeline module.
//!
//! These tests run the full scan against a real folder tree and check:
//! - Classification of new, updated, trimmed, orphaned and city-less trips
//! - Recovery from a missing or broken manifest
//! - The files written for review

use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use travel_photo_scanner::core::pipeline::Pipeline;
use travel_photo_scanner::core::reporter::ReportConfig;
use travel_photo_scanner::TripScanError;

/// Create empty photo files under `<root>/<year>/<country>/`
fn photos(temp: &TempDir, folder: &str, names: &[&str]) {
    let dir = temp.child("images/photo").child(folder);
    dir.create_dir_all().unwrap();
    for name in names {
        dir.child(name).touch().unwrap();
    }
}

fn manifest(temp: &TempDir, text: &str) {
    temp.child("data").create_dir_all().unwrap();
    temp.child("data/travels.json").write_str(text).unwrap();
}

fn pipeline(temp: &TempDir) -> Pipeline {
    Pipeline::builder()
        .root(temp.child("images/photo").path())
        .manifest_path(temp.child("data/travels.json").path())
        .template_path(temp.child("data/travels-template.json").path())
        .last_scan_path(temp.child("data/last-scan.txt").path())
        .build()
}

#[test]
fn pipeline_classifies_reference_scenarios() {
    let temp = TempDir::new().unwrap();
    photos(&temp, "2024/Japan", &["hokkaido_01.jpg", "hokkaido_02.jpg", "osaka_01.jpg"]);
    photos(&temp, "2025/Taiwan", &["taipei_01.jpg", "taipei_02.jpg"]);
    manifest(
        &temp,
        r#"{ "data": [
                { "year": "2024", "country": "Japan", "city": [], "photo": ["hokkaido_01", "hokkaido_02"] },
                { "year": "2023", "country": "Korea", "city": ["seoul"], "photo": ["seoul_01", "seoul_02"] }
            ] }"#,
    );

    let result = pipeline(&temp).run().unwrap();
    let report = &result.report;

    assert_eq!(report.trips_need_city_fix.len(), 1);
    assert_eq!(report.trips_need_city_fix[0].key, "2024_Japan");
    assert_eq!(report.trips_need_city_fix[0].added_cities, vec!["hokkaido"]);
    assert!(report.updated_trips.is_empty());

    assert_eq!(report.new_trips.len(), 1);
    assert_eq!(report.new_trips[0].record.city, vec!["taipei"]);
    assert_eq!(report.new_trips[0].record.photo, vec!["taipei_01", "taipei_02"]);

    assert_eq!(report.deleted_trips.len(), 1);
    assert_eq!(report.deleted_trips[0].key, "2023_Korea");

    temp.child("data/travels-template.json")
        .assert(predicate::str::contains("\"reason\": \"folder_not_found\""))
        .assert(predicate::str::contains("\"tripsNeedCityFix\": 1"))
        .assert(predicate::str::contains("\"photo\": [\"taipei_01\", \"taipei_02\"]"));
    temp.child("data/last-scan.txt").assert(
        predicate::str::is_match(r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2} \(UTC\+08:00\)\n$").unwrap(),
    );
}

#[test]
fn pipeline_is_idempotent_when_nothing_changes() {
    let temp = TempDir::new().unwrap();
    photos(&temp, "2024/Japan", &["kyoto_01.jpg", "osaka_01.JPG"]);
    photos(&temp, "2019/Spain_Portugal", &["lisbon_01.webp"]);
    manifest(
        &temp,
        r#"{ "data": [
                { "year": 2024, "country": "Japan", "city": ["kyoto", "osaka"], "photo": ["osaka_01", "kyoto_01"] },
                { "year": "2019", "country": ["Spain", "Portugal"], "city": "lisbon", "photo": ["lisbon_01"] }
            ] }"#,
    );

    let first = pipeline(&temp).run().unwrap();
    let second = pipeline(&temp).run().unwrap();

    assert_eq!(first.report, second.report);
    assert_eq!(first.report.unchanged, vec!["2019_Spain_Portugal", "2024_Japan"]);
    assert!(!first.report.has_changes());
}

#[test]
fn pipeline_merges_added_photos_and_reports_removed_ones() {
    let temp = TempDir::new().unwrap();
    photos(&temp, "2022/Italy", &["milan_01.png", "rome_01.jpg"]);
    manifest(
        &temp,
        r#"{ "data": [
                { "year": "2022", "country": "Italy", "city": ["rome", "venice"],
                  "cityTW": ["羅馬", "威尼斯"], "photo": ["venice_01", "rome_01"] }
            ] }"#,
    );

    let result = pipeline(&temp).run().unwrap();

    let updated = &result.report.updated_trips[0];
    assert_eq!(updated.new_photos, vec!["milan_01"]);
    assert_eq!(
        updated.updated_record.photo,
        vec!["milan_01", "rome_01", "venice_01"]
    );
    assert_eq!(updated.display_name, "羅馬、威尼斯");

    let trimmed = &result.report.trips_with_deleted_photos[0];
    assert_eq!(trimmed.deleted_photos, vec!["venice_01"]);
    assert_eq!(trimmed.updated_record.city, vec!["milan", "rome"]);
}

#[test]
fn pipeline_treats_broken_manifest_as_empty() {
    let temp = TempDir::new().unwrap();
    photos(&temp, "2025/Taiwan", &["taipei_01.jpg"]);
    manifest(&temp, "{ broken");

    let result = pipeline(&temp).run().unwrap();

    assert_eq!(result.report.new_trips.len(), 1);
    temp.child("data/travels.json").assert("{ broken");
}

#[test]
fn pipeline_missing_root_writes_nothing() {
    let temp = TempDir::new().unwrap();

    let result = pipeline(&temp).run();

    assert!(matches!(result, Err(TripScanError::Scan(_))));
    temp.child("data/travels-template.json")
        .assert(predicate::path::missing());
    temp.child("data/last-scan.txt")
        .assert(predicate::path::missing());
}

#[test]
fn pipeline_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    photos(&temp, "2025/Taiwan", &["taipei_01.jpg", "notes.txt"]);

    let result = Pipeline::builder()
        .root(temp.child("images/photo").path())
        .manifest_path(temp.child("data/travels.json").path())
        .template_path(temp.child("data/travels-template.json").path())
        .last_scan_path(temp.child("data/last-scan.txt").path())
        .dry_run(true)
        .build()
        .run()
        .unwrap();

    assert_eq!(result.photos_found, 1);
    assert_eq!(result.report.new_trips.len(), 1);
    assert!(result.written.is_empty());
    temp.child("data").assert(predicate::path::missing());
}

#[test]
fn pipeline_plain_layout_writes_one_photo_per_line() {
    let temp = TempDir::new().unwrap();
    photos(&temp, "2025/Taiwan", &["taipei_01.jpg", "taipei_02.jpg"]);

    let result = Pipeline::builder()
        .root(temp.child("images/photo").path())
        .manifest_path(temp.child("data/travels.json").path())
        .template_path(temp.child("data/travels-template.json").path())
        .last_scan_path(temp.child("data/last-scan.txt").path())
        .report_config(ReportConfig {
            compact_arrays: false,
            ..Default::default()
        })
        .build()
        .run()
        .unwrap();

    assert_eq!(result.written.len(), 2);
    temp.child("data/travels-template.json")
        .assert(predicate::str::contains("\"taipei_01\",\n"))
        .assert(predicate::str::contains("\"taipei_02\"\n"))
        .assert(predicate::str::contains("[\"taipei_01\", \"taipei_02\"]").not());
}

#[test]
fn pipeline_ignores_hidden_folders_under_root() {
    let temp = TempDir::new().unwrap();
    photos(&temp, ".git/objects", &["x_1.jpg"]);
    photos(&temp, "2024/.cache", &["y_1.jpg"]);

    let result = pipeline(&temp).run().unwrap();

    assert_eq!(result.report.total_scanned, 0);
    assert!(result.report.new_trips.is_empty());
    assert_eq!(result.photos_found, 0);
    temp.child("data/travels-template.json")
        .assert(predicate::str::contains("\"totalScanned\": 0"))
        .assert(predicate::str::contains(".git_objects").not());
}
