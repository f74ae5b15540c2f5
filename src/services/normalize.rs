// src/services/normalize.rs
// DOCUMENTATION: Upstream place → PlaceRecord mapping
// PURPOSE: One normalization per API generation, both producing the same shape

use crate::models::{PlaceRecord, ADDRESS_NOT_AVAILABLE, UNKNOWN_NAME};
use crate::services::google_places_client::{LegacyPlace, V1Place};

/// Normalize legacy Nearby Search results
/// DOCUMENTATION: Keeps upstream order; `number` is assigned 1..=N by that order
pub fn normalize_legacy(places: Vec<LegacyPlace>) -> Vec<PlaceRecord> {
    places
        .into_iter()
        .enumerate()
        .map(|(index, place)| legacy_record(place, index + 1))
        .collect()
}

/// Normalize v1 results
/// DOCUMENTATION: With `open_now_only`, places not reported open are dropped
/// before numbering so numbers stay dense
pub fn normalize_v1(places: Vec<V1Place>, open_now_only: bool) -> Vec<PlaceRecord> {
    places
        .into_iter()
        .filter(|place| !open_now_only || v1_is_open(place) == Some(true))
        .enumerate()
        .map(|(index, place)| v1_record(place, index + 1))
        .collect()
}

fn legacy_record(place: LegacyPlace, number: usize) -> PlaceRecord {
    let (lat, lng) = place
        .geometry
        .and_then(|g| g.location)
        .map(|l| (l.lat, l.lng))
        .unwrap_or((0.0, 0.0));

    let photos: Vec<String> = place
        .photos
        .into_iter()
        .map(|p| p.photo_reference)
        .filter(|r| !r.is_empty())
        .collect();

    PlaceRecord {
        id: place.place_id.clone(),
        place_id: place.place_id,
        number,
        name: non_blank(place.name).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        lat,
        lng,
        address: non_blank(place.vicinity)
            .or_else(|| non_blank(place.formatted_address))
            .unwrap_or_else(|| ADDRESS_NOT_AVAILABLE.to_string()),
        rating: clamp_rating(place.rating),
        reviews: place.user_ratings_total.unwrap_or(0),
        is_open: place.opening_hours.and_then(|h| h.open_now),
        photo: photos.first().cloned(),
        photos,
        price_level: place.price_level.filter(|level| *level <= 4),
        types: place.types,
    }
}

fn v1_record(place: V1Place, number: usize) -> PlaceRecord {
    let is_open = v1_is_open(&place);
    let (lat, lng) = place
        .location
        .map(|l| (l.latitude, l.longitude))
        .unwrap_or((0.0, 0.0));

    let photos: Vec<String> = place
        .photos
        .into_iter()
        .map(|p| p.name)
        .filter(|n| !n.is_empty())
        .collect();

    PlaceRecord {
        id: place.id.clone(),
        place_id: place.id,
        number,
        name: non_blank(place.display_name.map(|d| d.text))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        lat,
        lng,
        address: non_blank(place.short_formatted_address)
            .or_else(|| non_blank(place.formatted_address))
            .unwrap_or_else(|| ADDRESS_NOT_AVAILABLE.to_string()),
        rating: clamp_rating(place.rating),
        reviews: place.user_rating_count.unwrap_or(0),
        is_open,
        photo: photos.first().cloned(),
        photos,
        price_level: place.price_level.as_deref().and_then(v1_price_level),
        types: place.types,
    }
}

fn v1_is_open(place: &V1Place) -> Option<bool> {
    place.current_opening_hours.as_ref().and_then(|h| h.open_now)
}

/// PRICE_LEVEL_* enum name to 0-4
fn v1_price_level(level: &str) -> Option<u8> {
    match level {
        "PRICE_LEVEL_FREE" => Some(0),
        "PRICE_LEVEL_INEXPENSIVE" => Some(1),
        "PRICE_LEVEL_MODERATE" => Some(2),
        "PRICE_LEVEL_EXPENSIVE" => Some(3),
        "PRICE_LEVEL_VERY_EXPENSIVE" => Some(4),
        _ => None,
    }
}

fn clamp_rating(rating: Option<f64>) -> f64 {
    rating
        .filter(|r| r.is_finite())
        .map(|r| r.clamp(0.0, 5.0))
        .unwrap_or(0.0)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
