//! Change descriptors produced by the classifier.

use crate::core::manifest::ManifestRecord;
use serde::Serialize;

/// Placeholder the site owner replaces with real travel dates
pub const DATE_PLACEHOLDER: &str = "MM-DD";

/// A folder with no manifest entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub key: String,
    pub display_name: String,
    pub photo_count: usize,
    /// Ready-to-merge manifest entry
    pub record: ManifestRecord,
}

/// A recorded trip whose folder gained photos
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedTrip {
    pub key: String,
    pub display_name: String,
    pub new_photos: Vec<String>,
    /// Cities of the merged photos missing from the recorded `city`
    pub added_cities: Vec<String>,
    /// Recorded entry with `photo` = sorted union and `city` recomputed
    pub updated_record: ManifestRecord,
}

/// Why a recorded trip is proposed for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionReason {
    /// The `<year>/<country>` folder no longer exists
    FolderNotFound,
}

impl DeletionReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::FolderNotFound => "Photo folder not found",
        }
    }
}

/// A recorded trip whose folder is gone
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTrip {
    pub key: String,
    pub display_name: String,
    pub reason: DeletionReason,
    pub photo_count: usize,
    pub record: ManifestRecord,
}

/// A recorded trip whose folder lost photos
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripWithDeletedPhotos {
    pub key: String,
    pub display_name: String,
    pub deleted_photos: Vec<String>,
    pub remaining_photos: Vec<String>,
    /// Recorded cities with no remaining photo
    pub removed_cities: Vec<String>,
    /// Recorded entry with `photo` = remaining and `city` recomputed
    pub updated_record: ManifestRecord,
}

/// A recorded trip with photos but an empty `city`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityFix {
    pub key: String,
    pub display_name: String,
    /// Cities derived from the recorded photos only
    pub added_cities: Vec<String>,
    pub updated_record: ManifestRecord,
}

/// Per-category counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_scanned: usize,
    pub new_trips: usize,
    pub updated_trips: usize,
    pub deleted_trips: usize,
    pub trips_with_deleted_photos: usize,
    pub trips_need_city_fix: usize,
    pub unchanged: usize,
}

/// Everything the classifier found, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub total_scanned: usize,
    pub new_trips: Vec<NewTrip>,
    pub updated_trips: Vec<UpdatedTrip>,
    pub deleted_trips: Vec<DeletedTrip>,
    pub trips_with_deleted_photos: Vec<TripWithDeletedPhotos>,
    pub trips_need_city_fix: Vec<CityFix>,
    /// Keys of trips that match the manifest exactly
    pub unchanged: Vec<String>,
}

impl ScanReport {
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            total_scanned: self.total_scanned,
            new_trips: self.new_trips.len(),
            updated_trips: self.updated_trips.len(),
            deleted_trips: self.deleted_trips.len(),
            trips_with_deleted_photos: self.trips_with_deleted_photos.len(),
            trips_need_city_fix: self.trips_need_city_fix.len(),
            unchanged: self.unchanged.len(),
        }
    }

    /// Whether any category other than `unchanged` is populated
    pub fn has_changes(&self) -> bool {
        !(self.new_trips.is_empty()
            && self.updated_trips.is_empty()
            && self.deleted_trips.is_empty()
            && self.trips_with_deleted_photos.is_empty()
            && self.trips_need_city_fix.is_empty())
    }
}
