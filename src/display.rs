// src/display.rs
// DOCUMENTATION: Presentation helpers for normalized places
// PURPOSE: Distance, price, hours and category text shown next to each result

use crate::models::PlaceRecord;

/// Earth radius in miles
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance between two points, in miles, rounded to 0.1
pub fn distance_miles(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_MILES * c * 10.0).round() / 10.0
}

/// "$" to "$$$$"; free or unknown levels read "N/A"
pub fn price_symbols(level: Option<u8>) -> &'static str {
    match level {
        Some(1) => "$",
        Some(2) => "$$",
        Some(3) => "$$$",
        Some(4) => "$$$$",
        _ => "N/A",
    }
}

pub fn hours_status(is_open: Option<bool>) -> &'static str {
    match is_open {
        Some(true) => "Open",
        Some(false) => "Closed",
        None => "Hours not available",
    }
}

/// Up to three display labels for known category tags, in tag order
pub fn category_labels(types: &[String]) -> Vec<&'static str> {
    types
        .iter()
        .filter_map(|t| match t.as_str() {
            "pizza" => Some("Pizza"),
            "italian_restaurant" => Some("Italian"),
            "restaurant" => Some("Restaurant"),
            "cafe" => Some("Café"),
            "fast_food" => Some("Fast Food"),
            "bar" => Some("Bar"),
            "bakery" => Some("Bakery"),
            _ => None,
        })
        .take(3)
        .collect()
}

/// One-line summary used by the terminal client
pub fn summary_line(place: &PlaceRecord, origin: (f64, f64)) -> String {
    let categories = category_labels(&place.types);
    let mut line = format!(
        "{:>2}. {} ({:.1}★, {} reviews) · {} · {} · {:.1} mi",
        place.number,
        place.name,
        place.rating,
        place.reviews,
        hours_status(place.is_open),
        price_symbols(place.price_level),
        distance_miles(origin, (place.lat, place.lng)),
    );
    if !categories.is_empty() {
        line.push_str(" · ");
        line.push_str(&categories.join(", "));
    }
    line
}
