//! Manifest record shape and its string-or-array normalization.

use crate::core::trip::trip_key;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One published trip as stored in the manifest `data` array
///
/// `country`, `city` and `cityTW` may be a string or an array in the file;
/// they are always ordered lists here. Fields this tool does not know about
/// are kept in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRecord {
    #[serde(default, deserialize_with = "year_text")]
    pub year: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(
        default,
        deserialize_with = "one_or_many",
        serialize_with = "country_shape"
    )]
    pub country: Vec<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub city: Vec<String>,

    #[serde(
        rename = "cityTW",
        alias = "city_tw",
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub city_tw: Vec<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub photo: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManifestRecord {
    /// Lookup key shared with scanned trips
    pub fn key(&self) -> String {
        trip_key(&self.year, &self.country)
    }

    /// Localized city names, then plain city names, then countries
    pub fn display_name(&self) -> String {
        display_name(&self.city_tw, &self.city, &self.country)
    }
}

/// Pick the most readable label for a trip
pub fn display_name(city_tw: &[String], city: &[String], country: &[String]) -> String {
    if !city_tw.is_empty() {
        city_tw.join("、")
    } else if !city.is_empty() {
        city.join(", ")
    } else {
        country.join(", ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    };

    Ok(values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearRepr {
    Text(String),
    Number(serde_json::Number),
}

fn year_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<YearRepr>::deserialize(deserializer)? {
        None => String::new(),
        Some(YearRepr::Text(year)) => year.trim().to_string(),
        Some(YearRepr::Number(year)) => year.to_string(),
    })
}

/// A single country is written as a plain string, as the site expects
fn country_shape<S>(country: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match country {
        [single] => serializer.serialize_str(single),
        many => many.serialize(serializer),
    }
}
