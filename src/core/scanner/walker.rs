//! Directory walking implementation using walkdir.

use super::{filter::ImageFilter, ScanResult, TripScanner};
use crate::core::trip::Trip;
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Depth of the country folders below the root (`<year>/<country>`)
const COUNTRY_DEPTH: usize = 2;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    /// Year and country folders are directories; hidden ones are skipped
    ///
    /// The root itself always passes, whatever its name.
    fn is_trip_folder(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        if !entry.file_type().is_dir() {
            return false;
        }
        match entry.file_name().to_str() {
            Some(name) => !self.filter.skips_hidden(name),
            None => false,
        }
    }

    /// Collect photo base names directly inside one country folder
    fn scan_photos(&self, folder: &Path, errors: &mut Vec<ScanError>) -> Vec<String> {
        let mut photos = Vec::new();

        let walker = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    errors.push(walk_error(e));
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.filter.should_include(entry.path()) {
                continue;
            }

            match entry.path().file_stem().and_then(|s| s.to_str()) {
                Some(stem) => photos.push(stem.to_string()),
                None => warn!(path = %entry.path().display(), "Skipping photo with non UTF-8 name"),
            }
        }

        photos
    }
}

impl TripScanner for WalkDirScanner {
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut result = ScanResult::default();

        // No min_depth: the filter must see year folders to prune hidden ones
        let walker = WalkDir::new(root)
            .max_depth(COUNTRY_DEPTH)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.is_trip_folder(entry));

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let error = walk_error(e);
                    warn!("{}", error);
                    result.errors.push(error);
                    continue;
                }
            };

            if entry.depth() != COUNTRY_DEPTH {
                continue;
            }

            let folder_name = entry.file_name().to_str();
            let year = entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str());

            let (Some(year), Some(folder_name)) = (year, folder_name) else {
                warn!(path = %entry.path().display(), "Skipping folder with non UTF-8 name");
                continue;
            };

            let photos = self.scan_photos(entry.path(), &mut result.errors);
            debug!(year, folder = folder_name, photos = photos.len(), "Scanned trip folder");
            result.photos_found += photos.len();

            let trip = Trip::new(year, folder_name, photos);
            if trip.country.is_empty() {
                warn!(path = %entry.path().display(), "Skipping folder without a country name");
                continue;
            }

            match result.trips.get_mut(&trip.key()) {
                Some(existing) => {
                    warn!(key = %trip.key(), folder = folder_name, "Merging folder into existing trip");
                    existing.merge_photos(trip.photos);
                }
                None => {
                    result.trips.insert(trip.key(), trip);
                }
            }
        }

        info!(
            root = %root.display(),
            trips = result.trips.len(),
            photos = result.photos_found,
            "Photo tree scanned"
        );

        Ok(result)
    }
}

fn walk_error(e: walkdir::Error) -> ScanError {
    let path = e.path().map(Path::to_path_buf).unwrap_or_else(PathBuf::new);
    let source = match e.into_io_error() {
        Some(io) => io,
        None => std::io::Error::other("filesystem loop detected"),
    };
    ScanError::ReadDirectory { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_photo(dir: &Path, name: &str) {
        fs::create_dir_all(dir).unwrap();
        let mut file = File::create(dir.join(name)).unwrap();
        // Write minimal JPEG header
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    }

    fn scan(root: &Path) -> ScanResult {
        WalkDirScanner::new(ScanConfig::default()).scan(root).unwrap()
    }

    #[test]
    fn scan_empty_root_returns_no_trips() {
        let temp_dir = TempDir::new().unwrap();

        let result = scan(temp_dir.path());

        assert!(result.trips.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_builds_trip_from_year_and_country() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("2025").join("Taiwan");
        create_photo(&folder, "taipei_02.jpg");
        create_photo(&folder, "taipei_01.jpg");

        let result = scan(temp_dir.path());

        let trip = &result.trips["2025_Taiwan"];
        assert_eq!(trip.year, "2025");
        assert_eq!(trip.country, vec!["Taiwan"]);
        assert_eq!(trip.cities, vec!["taipei"]);
        assert_eq!(trip.photos, vec!["taipei_01", "taipei_02"]);
        assert_eq!(result.photos_found, 2);
    }

    #[test]
    fn scan_splits_multi_country_folder() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("2019").join("Spain_Portugal");
        create_photo(&folder, "lisbon_01.webp");
        create_photo(&folder, "madrid_01.PNG");

        let result = scan(temp_dir.path());

        let trip = &result.trips["2019_Spain_Portugal"];
        assert_eq!(trip.country, vec!["Spain", "Portugal"]);
        assert_eq!(trip.cities, vec!["lisbon", "madrid"]);
    }

    #[test]
    fn scan_ignores_files_outside_country_folders() {
        let temp_dir = TempDir::new().unwrap();
        create_photo(temp_dir.path(), "stray.jpg");
        create_photo(&temp_dir.path().join("2024"), "also_stray.jpg");
        create_photo(&temp_dir.path().join("2024").join("Japan"), "osaka_01.jpg");
        create_photo(
            &temp_dir.path().join("2024").join("Japan").join("raw"),
            "osaka_99.jpg",
        );

        let result = scan(temp_dir.path());

        assert_eq!(result.trips.len(), 1);
        assert_eq!(result.trips["2024_Japan"].photos, vec!["osaka_01"]);
    }

    #[test]
    fn scan_excludes_non_image_and_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("2024").join("Japan");
        create_photo(&folder, "osaka_01.jpg");
        create_photo(&folder, "notes.txt");
        create_photo(&folder, "._osaka_01.jpg");

        let result = scan(temp_dir.path());

        assert_eq!(result.trips["2024_Japan"].photos, vec!["osaka_01"]);
    }

    #[test]
    fn scan_keeps_empty_country_folder_as_trip() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("2023").join("Korea")).unwrap();

        let result = scan(temp_dir.path());

        let trip = &result.trips["2023_Korea"];
        assert!(trip.photos.is_empty());
        assert!(trip.cities.is_empty());
    }

    #[test]
    fn scan_skips_hidden_folders() {
        let temp_dir = TempDir::new().unwrap();
        create_photo(&temp_dir.path().join(".git").join("objects"), "x_1.jpg");
        create_photo(&temp_dir.path().join("2024").join(".cache"), "y_1.jpg");

        let result = scan(temp_dir.path());

        assert!(result.trips.is_empty());
    }

    #[test]
    fn scan_skips_hidden_year_folder_at_top_level() {
        let temp_dir = TempDir::new().unwrap();
        create_photo(&temp_dir.path().join(".git").join("objects"), "x_1.jpg");
        create_photo(&temp_dir.path().join("2024").join("Japan"), "osaka_01.jpg");

        let result = scan(temp_dir.path());

        let keys: Vec<&String> = result.trips.keys().collect();
        assert_eq!(keys, vec!["2024_Japan"]);
        assert_eq!(result.photos_found, 1);
    }

    #[test]
    fn scan_includes_hidden_folders_when_asked() {
        let temp_dir = TempDir::new().unwrap();
        create_photo(&temp_dir.path().join(".2024").join("Japan"), "osaka_01.jpg");

        let scanner = WalkDirScanner::new(ScanConfig {
            include_hidden: true,
            ..Default::default()
        });
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert!(result.trips.contains_key(".2024_Japan"));
    }

    #[test]
    fn scan_accepts_root_with_hidden_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(".photos");
        create_photo(&root.join("2025").join("Taiwan"), "taipei_01.jpg");

        let result = scan(&root);

        assert!(result.trips.contains_key("2025_Taiwan"));
    }

    #[test]
    fn scan_nonexistent_root_returns_error() {
        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/photo/root/12345"));

        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }
}
