//! # Differ Module
//!
//! Compares scanned trips with the manifest and sorts every trip into a
//! change category.
//!
//! ## Categories
//! 1. **New** - folder without a manifest entry
//! 2. **Needs city fix** - entry has photos but no `city`; nothing else is compared
//! 3. **Unchanged** - same photo names on both sides
//! 4. **Deleted photos** - entry lists photos the folder no longer has
//! 5. **Updated** - folder has photos the entry does not list
//! 6. **Deleted** - entry with photos whose folder is gone
//!
//! A trip that both gains and loses photos is reported under 4 and 5; each
//! descriptor carries its own proposed record.

mod types;

pub use types::{
    CityFix, DeletedTrip, DeletionReason, NewTrip, ScanReport, ScanSummary, TripWithDeletedPhotos,
    UpdatedTrip, DATE_PLACEHOLDER,
};

use crate::core::manifest::{Manifest, ManifestRecord};
use crate::core::trip::{derive_cities, difference, union_sorted, Trip};
use serde_json::Map;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Classify every scanned trip and every orphaned manifest entry
pub fn classify(scanned: &BTreeMap<String, Trip>, manifest: &Manifest) -> ScanReport {
    let mut report = ScanReport {
        total_scanned: scanned.len(),
        ..Default::default()
    };

    for (key, trip) in scanned {
        let Some(existing) = manifest.get(key) else {
            debug!(key = %key, "New trip");
            report.new_trips.push(new_trip(key, trip));
            continue;
        };

        if existing.city.is_empty() && !existing.photo.is_empty() {
            debug!(key = %key, "Trip needs city fix");
            report.trips_need_city_fix.push(city_fix(key, existing));
            continue;
        }

        let new_photos = difference(&trip.photos, &existing.photo);
        let deleted_photos = sorted(difference(&existing.photo, &trip.photos));

        if new_photos.is_empty() && deleted_photos.is_empty() {
            report.unchanged.push(key.clone());
            continue;
        }

        if !deleted_photos.is_empty() {
            debug!(key = %key, deleted = deleted_photos.len(), "Trip lost photos");
            report
                .trips_with_deleted_photos
                .push(trip_with_deleted_photos(key, trip, existing, deleted_photos));
        }

        if !new_photos.is_empty() {
            debug!(key = %key, added = new_photos.len(), "Trip gained photos");
            report
                .updated_trips
                .push(updated_trip(key, trip, existing, new_photos));
        }
    }

    for (key, record) in manifest.trips() {
        if scanned.contains_key(&key) || record.photo.is_empty() {
            continue;
        }
        debug!(key = %key, "Trip folder missing");
        report.deleted_trips.push(DeletedTrip {
            display_name: record.display_name(),
            reason: DeletionReason::FolderNotFound,
            photo_count: record.photo.len(),
            record: record.clone(),
            key,
        });
    }

    let summary = report.summary();
    info!(
        scanned = summary.total_scanned,
        new = summary.new_trips,
        updated = summary.updated_trips,
        deleted = summary.deleted_trips,
        deleted_photos = summary.trips_with_deleted_photos,
        city_fix = summary.trips_need_city_fix,
        unchanged = summary.unchanged,
        "Classification complete"
    );

    report
}

fn new_trip(key: &str, trip: &Trip) -> NewTrip {
    let record = ManifestRecord {
        year: trip.year.clone(),
        start_date: Some(DATE_PLACEHOLDER.to_string()),
        end_date: Some(DATE_PLACEHOLDER.to_string()),
        country: trip.country.clone(),
        city: trip.cities.clone(),
        // Filled in by hand
        city_tw: Vec::new(),
        photo: trip.photos.clone(),
        folder_name: Some(trip.folder_name.clone()),
        extra: Map::new(),
    };

    NewTrip {
        key: key.to_string(),
        display_name: record.display_name(),
        photo_count: trip.photos.len(),
        record,
    }
}

fn city_fix(key: &str, existing: &ManifestRecord) -> CityFix {
    let added_cities = derive_cities(&existing.photo);
    let updated_record = ManifestRecord {
        city: added_cities.clone(),
        ..existing.clone()
    };

    CityFix {
        key: key.to_string(),
        display_name: updated_record.display_name(),
        added_cities,
        updated_record,
    }
}

fn trip_with_deleted_photos(
    key: &str,
    trip: &Trip,
    existing: &ManifestRecord,
    deleted_photos: Vec<String>,
) -> TripWithDeletedPhotos {
    let remaining_photos = trip.photos.clone();
    let cities = derive_cities(&remaining_photos);
    let removed_cities = difference(&existing.city, &cities);

    let updated_record = ManifestRecord {
        city: cities,
        photo: remaining_photos.clone(),
        ..existing.clone()
    };

    TripWithDeletedPhotos {
        key: key.to_string(),
        display_name: existing.display_name(),
        deleted_photos,
        remaining_photos,
        removed_cities,
        updated_record,
    }
}

fn updated_trip(
    key: &str,
    trip: &Trip,
    existing: &ManifestRecord,
    new_photos: Vec<String>,
) -> UpdatedTrip {
    let merged = union_sorted(&existing.photo, trip.photos.iter().cloned());
    let cities = derive_cities(&merged);
    let added_cities = difference(&cities, &existing.city);

    let updated_record = ManifestRecord {
        city: cities,
        photo: merged,
        ..existing.clone()
    };

    UpdatedTrip {
        key: key.to_string(),
        display_name: updated_record.display_name(),
        new_photos,
        added_cities,
        updated_record,
    }
}

fn sorted(items: Vec<String>) -> Vec<String> {
    items.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}
