// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Normalized place records and the search request they answer

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Name used when the upstream record carries none
pub const UNKNOWN_NAME: &str = "Unknown";

/// Address used when the upstream record carries none
pub const ADDRESS_NOT_AVAILABLE: &str = "Address not available";

/// Normalized representation of one upstream place
/// DOCUMENTATION: Built fresh for every search response, never mutated afterwards
/// `number` is the 1-based position in the response, not an identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    /// Upstream identifier (format differs between API versions)
    pub id: String,

    /// Same value as `id`, kept for clients that read `placeId`
    pub place_id: String,

    /// Rank in the response, 1..=N
    pub number: usize,

    pub name: String,

    pub lat: f64,
    pub lng: f64,

    pub address: String,

    /// 0-5, 0 when unrated
    pub rating: f64,

    /// Number of user ratings
    pub reviews: u32,

    /// None means unknown, not closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,

    /// First photo identifier, consumed by the photo proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Every photo identifier in upstream order
    #[serde(default)]
    pub photos: Vec<String>,

    /// 0 (free) to 4 (very expensive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,

    /// Upstream category tags in upstream order
    #[serde(default)]
    pub types: Vec<String>,
}

/// Search request accepted by the search proxy
/// DOCUMENTATION: Same shape for the JSON body (POST) and the query string (GET)
/// `lat`/`lng` are optional here so a missing value is reported as a 400
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(custom = "validate_latitude")]
    pub lat: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(custom = "validate_longitude")]
    pub lng: Option<f64>,

    /// Meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 50000))]
    pub radius: Option<u32>,

    /// Free-text keyword; `keyword` is accepted as an alias
    #[serde(default, alias = "keyword", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Only return places reported open right now
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
}

impl SearchParams {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
            ..Self::default()
        }
    }

    /// Explicit query, ignoring blank strings
    pub fn explicit_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err(ValidationError::new("latitude_out_of_range"))
    }
}

fn validate_longitude(lng: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lng) {
        Ok(())
    } else {
        Err(ValidationError::new("longitude_out_of_range"))
    }
}

/// Coordinates accepted as JSON numbers or numeric strings
mod lenient {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Number(n)) => Ok(Some(n)),
            Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(NumberOrString::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid coordinate: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_from_json_numbers_and_strings() {
        let params: SearchParams =
            serde_json::from_str(r#"{"lat": 40.7128, "lng": "-74.006", "radius": 1500}"#).unwrap();
        assert_eq!(params.lat, Some(40.7128));
        assert_eq!(params.lng, Some(-74.006));
        assert_eq!(params.radius, Some(1500));
        assert!(params.query.is_none());
    }

    #[test]
    fn test_search_params_blank_coordinate_is_missing() {
        let params: SearchParams = serde_json::from_str(r#"{"lat": "", "lng": 2}"#).unwrap();
        assert!(params.lat.is_none());
        assert_eq!(params.lng, Some(2.0));
    }

    #[test]
    fn test_search_params_rejects_garbage_coordinate() {
        let result: Result<SearchParams, _> = serde_json::from_str(r#"{"lat": "north", "lng": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_params_keyword_alias() {
        let params: SearchParams =
            serde_json::from_str(r#"{"lat": 1, "lng": 2, "keyword": "pizza"}"#).unwrap();
        assert_eq!(params.explicit_query(), Some("pizza"));

        let params: SearchParams = serde_json::from_str(r#"{"query": "   "}"#).unwrap();
        assert_eq!(params.explicit_query(), None);
    }

    #[test]
    fn test_search_params_validation() {
        assert!(SearchParams::new(40.0, -3.0).validate().is_ok());
        assert!(SearchParams::new(91.0, 0.0).validate().is_err());
        assert!(SearchParams::new(0.0, -181.0).validate().is_err());

        let params = SearchParams {
            radius: Some(0),
            ..SearchParams::new(0.0, 0.0)
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_place_record_serializes_camel_case_and_omits_unknowns() {
        let record = PlaceRecord {
            id: "abc".into(),
            place_id: "abc".into(),
            number: 1,
            name: "A".into(),
            lat: 1.0,
            lng: 2.0,
            address: ADDRESS_NOT_AVAILABLE.into(),
            rating: 0.0,
            reviews: 0,
            is_open: None,
            photo: None,
            photos: Vec::new(),
            price_level: None,
            types: Vec::new(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["placeId"], "abc");
        assert_eq!(value["address"], "Address not available");
        assert!(value.get("isOpen").is_none());
        assert!(value.get("photo").is_none());
        assert_eq!(value["types"], serde_json::json!([]));
    }
}
