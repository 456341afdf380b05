//! # Trip Module
//!
//! The unit the site publishes: one year, one or more countries, and the
//! photos taken there.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Separator between year and country tokens, and between city token and photo suffix
pub const TOKEN_SEPARATOR: char = '_';

/// A trip reconstructed from one `<year>/<country>` folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub year: String,
    /// Ordered country tokens; a `Japan_Korea` folder holds two
    pub country: Vec<String>,
    /// Sorted distinct city tokens of `photos`
    pub cities: Vec<String>,
    /// Sorted distinct photo base names
    pub photos: Vec<String>,
    /// Name of the folder the trip was read from
    pub folder_name: String,
}

impl Trip {
    /// Build a trip, normalizing photos and deriving cities
    pub fn new<I>(year: &str, folder_name: &str, photos: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let photos: BTreeSet<String> = photos.into_iter().collect();
        let photos: Vec<String> = photos.into_iter().collect();
        Self {
            year: year.to_string(),
            country: split_country(folder_name),
            cities: derive_cities(&photos),
            photos,
            folder_name: folder_name.to_string(),
        }
    }

    /// Lookup key shared with manifest records
    pub fn key(&self) -> String {
        trip_key(&self.year, &self.country)
    }

    /// Fold another folder's photos into this trip
    pub fn merge_photos<I>(&mut self, photos: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.photos = union_sorted(&self.photos, photos);
        self.cities = derive_cities(&self.photos);
    }
}

/// `year_country1_country2`
pub fn trip_key(year: &str, country: &[String]) -> String {
    let mut key = year.to_string();
    for token in country {
        key.push(TOKEN_SEPARATOR);
        key.push_str(token);
    }
    key
}

/// Split a country folder name into its ordered tokens, dropping empty ones
pub fn split_country(folder_name: &str) -> Vec<String> {
    folder_name
        .split(TOKEN_SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// The city a photo belongs to: everything before the first `_`
pub fn city_token(photo: &str) -> &str {
    photo
        .split_once(TOKEN_SEPARATOR)
        .map(|(city, _)| city)
        .unwrap_or(photo)
}

/// Sorted distinct city tokens of a photo list
pub fn derive_cities<S: AsRef<str>>(photos: &[S]) -> Vec<String> {
    photos
        .iter()
        .map(|photo| city_token(photo.as_ref()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted, duplicate-free union of two photo lists
pub fn union_sorted<I>(existing: &[String], added: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    existing
        .iter()
        .cloned()
        .chain(added)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Items of `left` missing from `right`, in `left` order
pub fn difference(left: &[String], right: &[String]) -> Vec<String> {
    let right: BTreeSet<&String> = right.iter().collect();
    left.iter()
        .filter(|item| !right.contains(item))
        .cloned()
        .collect()
}
