// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Handle communication with both generations of the Places API

use crate::config::{Config, UpstreamApiVersion};
use crate::errors::PlacesError;
use reqwest::{redirect, Client, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Field mask requested from the v1 API
/// DOCUMENTATION: Only the fields normalization reads; v1 bills per field
const V1_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.shortFormattedAddress,places.location,places.rating,places.userRatingCount,\
places.currentOpeningHours.openNow,places.photos,places.types,places.priceLevel";

/// Google Places API client
/// DOCUMENTATION: Holds the shared HTTP client and the credential
/// Built once at startup; the credential is checked per call so a missing key
/// fails every request instead of the process
#[derive(Clone)]
pub struct GooglePlacesClient {
    /// HTTP client for making requests (redirects are never followed implicitly)
    client: Client,
    /// Google Places API key
    api_key: Option<String>,
    /// Base URL for the legacy web service
    legacy_base_url: String,
    /// Base URL for the v1 API
    v1_base_url: String,
    /// Configured API generation
    api_version: UpstreamApiVersion,
}

/// One nearby search, with every default already applied
#[derive(Debug, Clone)]
pub struct NearbyRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters
    pub radius: u32,
    pub place_type: String,
    pub keyword: String,
    /// Caller supplied `keyword` (v1 switches to text search)
    pub explicit_keyword: bool,
    pub open_now: bool,
    pub max_result_count: u32,
}

// --- Legacy API wire format ---

/// Response from legacy Nearby Search
/// DOCUMENTATION: Status is carried in the body even on HTTP 200
#[derive(Debug, Deserialize, Serialize)]
pub struct LegacySearchResponse {
    #[serde(default)]
    pub results: Vec<LegacyPlace>,
    pub status: String,
    pub error_message: Option<String>,
}

/// Individual place from the legacy API
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LegacyPlace {
    #[serde(default)]
    pub place_id: String,
    pub name: Option<String>,
    pub geometry: Option<LegacyGeometry>,
    /// Short address, from Nearby Search
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub opening_hours: Option<LegacyOpeningHours>,
    #[serde(default)]
    pub photos: Vec<LegacyPhoto>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LegacyGeometry {
    pub location: Option<LegacyLocation>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LegacyLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LegacyOpeningHours {
    pub open_now: Option<bool>,
}

/// Photo from the legacy API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LegacyPhoto {
    /// Token the photo endpoint resolves to an image
    #[serde(default)]
    pub photo_reference: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

// --- v1 API wire format ---

/// Response from places:searchNearby and places:searchText
/// DOCUMENTATION: An empty result is `{}`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct V1SearchResponse {
    #[serde(default)]
    pub places: Vec<V1Place>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct V1Place {
    #[serde(default)]
    pub id: String,
    pub display_name: Option<V1LocalizedText>,
    pub formatted_address: Option<String>,
    pub short_formatted_address: Option<String>,
    pub location: Option<V1LatLng>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub current_opening_hours: Option<V1OpeningHours>,
    #[serde(default)]
    pub photos: Vec<V1Photo>,
    #[serde(default)]
    pub types: Vec<String>,
    /// PRICE_LEVEL_* enum name
    pub price_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct V1LocalizedText {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct V1LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct V1OpeningHours {
    pub open_now: Option<bool>,
}

/// Photo from the v1 API
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct V1Photo {
    /// Resource name: places/{place}/photos/{photo}
    #[serde(default)]
    pub name: String,
    pub width_px: Option<u32>,
    pub height_px: Option<u32>,
}

/// Error envelope returned by the v1 API
#[derive(Debug, Deserialize)]
struct V1ErrorEnvelope {
    error: V1Error,
}

#[derive(Debug, Deserialize)]
struct V1Error {
    message: Option<String>,
    status: Option<String>,
}

// --- v1 request bodies ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct V1NearbyBody<'a> {
    included_types: Vec<&'a str>,
    max_result_count: u32,
    location_restriction: V1LocationArea,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct V1TextBody<'a> {
    text_query: &'a str,
    included_type: &'a str,
    max_result_count: u32,
    location_bias: V1LocationArea,
}

#[derive(Debug, Serialize)]
struct V1LocationArea {
    circle: V1Circle,
}

#[derive(Debug, Serialize)]
struct V1Circle {
    center: V1LatLng,
    radius: f64,
}

impl V1LocationArea {
    fn around(request: &NearbyRequest) -> Self {
        Self {
            circle: V1Circle {
                center: V1LatLng {
                    latitude: request.latitude,
                    longitude: request.longitude,
                },
                radius: f64::from(request.radius),
            },
        }
    }
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    /// DOCUMENTATION: Disables implicit redirect following; photo lookups resolve
    /// redirects themselves so the hop count stays bounded
    pub fn new(config: &Config) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(|e| PlacesError::InternalError(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.places_api_key.clone(),
            legacy_base_url: config.legacy_base_url.trim_end_matches('/').to_string(),
            v1_base_url: config.v1_base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version,
        })
    }

    pub fn api_version(&self) -> UpstreamApiVersion {
        self.api_version
    }

    /// Get API key
    /// DOCUMENTATION: Fails with ServerMisconfigured before any network activity
    pub fn api_key(&self) -> Result<&str, PlacesError> {
        self.api_key.as_deref().ok_or_else(|| {
            log::error!("Places API key not configured");
            PlacesError::ServerMisconfigured("API key not configured".to_string())
        })
    }

    /// Perform legacy nearby search for places
    /// DOCUMENTATION: GET nearbysearch/json; OK and ZERO_RESULTS are success,
    /// every other body status is an upstream failure
    pub async fn legacy_nearby_search(
        &self,
        request: &NearbyRequest,
    ) -> Result<LegacySearchResponse, PlacesError> {
        let api_key = self.api_key()?;
        let url = format!("{}/nearbysearch/json", self.legacy_base_url);

        let mut params = vec![
            ("location", format!("{},{}", request.latitude, request.longitude)),
            ("radius", request.radius.to_string()),
            ("type", request.place_type.clone()),
            ("keyword", request.keyword.clone()),
            ("key", api_key.to_string()),
        ];

        if request.open_now {
            params.push(("opennow", "true".to_string()));
        }

        log::debug!(
            "Legacy nearby search: lat={}, lng={}, radius={}, keyword={}",
            request.latitude,
            request.longitude,
            request.radius,
            request.keyword
        );

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                log::error!("Legacy nearby search request failed: {}", e);
                PlacesError::InternalError(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PlacesError::InternalError(format!("Failed to read response: {}", e.without_url()))
        })?;

        if !status.is_success() {
            log::error!("Legacy nearby search HTTP error {}", status);
            let message = serde_json::from_str::<LegacySearchResponse>(&body)
                .map(|r| legacy_status_message(&r.status, r.error_message.as_deref()))
                .unwrap_or_else(|_| format!("API Error: HTTP {}", status.as_u16()));
            return Err(PlacesError::upstream(status.as_u16(), message));
        }

        let api_response: LegacySearchResponse = serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to parse legacy nearby search response: {}", e);
            PlacesError::InternalError(format!("Parse error: {}", e))
        })?;

        match api_response.status.as_str() {
            "OK" | "ZERO_RESULTS" => {
                log::info!(
                    "Legacy nearby search returned {} results",
                    api_response.results.len()
                );
                Ok(api_response)
            }
            other => {
                let message = legacy_status_message(other, api_response.error_message.as_deref());
                log::error!("Legacy nearby search status: {}", message);
                Err(PlacesError::upstream(500, message))
            }
        }
    }

    /// Perform v1 search for places
    /// DOCUMENTATION: places:searchNearby by default, places:searchText when the
    /// caller supplied a keyword (searchNearby has no keyword filter)
    pub async fn v1_search(&self, request: &NearbyRequest) -> Result<V1SearchResponse, PlacesError> {
        let api_key = self.api_key()?;

        let builder = if request.explicit_keyword {
            let url = format!("{}/places:searchText", self.v1_base_url);
            log::debug!(
                "v1 text search: lat={}, lng={}, radius={}, query={}",
                request.latitude,
                request.longitude,
                request.radius,
                request.keyword
            );
            self.client.post(url).json(&V1TextBody {
                text_query: &request.keyword,
                included_type: &request.place_type,
                max_result_count: request.max_result_count,
                location_bias: V1LocationArea::around(request),
            })
        } else {
            let url = format!("{}/places:searchNearby", self.v1_base_url);
            log::debug!(
                "v1 nearby search: lat={}, lng={}, radius={}",
                request.latitude,
                request.longitude,
                request.radius
            );
            self.client.post(url).json(&V1NearbyBody {
                included_types: vec![request.place_type.as_str()],
                max_result_count: request.max_result_count,
                location_restriction: V1LocationArea::around(request),
            })
        };

        let response = builder
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", V1_FIELD_MASK)
            .send()
            .await
            .map_err(|e| {
                log::error!("v1 search request failed: {}", e);
                PlacesError::InternalError(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::InternalError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<V1ErrorEnvelope>(&body) {
                Ok(envelope) => format!(
                    "API Error: {}",
                    envelope
                        .error
                        .message
                        .or(envelope.error.status)
                        .unwrap_or_else(|| status.to_string())
                ),
                Err(_) => format!("API Error: HTTP {}", status.as_u16()),
            };
            log::error!("v1 search error {}: {}", status, message);
            return Err(PlacesError::upstream(status.as_u16(), message));
        }

        let api_response: V1SearchResponse = serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to parse v1 search response: {}", e);
            PlacesError::InternalError(format!("Parse error: {}", e))
        })?;

        log::info!("v1 search returned {} results", api_response.places.len());
        Ok(api_response)
    }

    /// Legacy photo endpoint for a photo_reference
    pub fn legacy_photo_url(&self, reference: &str, max_width: u32) -> Result<Url, PlacesError> {
        let api_key = self.api_key()?;
        Url::parse_with_params(
            &format!("{}/photo", self.legacy_base_url),
            &[
                ("maxwidth", max_width.to_string().as_str()),
                ("photo_reference", reference),
                ("key", api_key),
            ],
        )
        .map_err(|e| PlacesError::InternalError(format!("Invalid photo URL: {}", e)))
    }

    /// v1 media endpoint for a photo resource name
    pub fn v1_media_url(&self, resource_name: &str, max_width: u32) -> Result<Url, PlacesError> {
        let api_key = self.api_key()?;
        Url::parse_with_params(
            &format!("{}/{}/media", self.v1_base_url, resource_name),
            &[
                ("maxWidthPx", max_width.to_string().as_str()),
                ("key", api_key),
            ],
        )
        .map_err(|e| PlacesError::InternalError(format!("Invalid media URL: {}", e)))
    }

    /// Single GET without redirect following
    pub async fn fetch(&self, url: Url) -> Result<Response, PlacesError> {
        self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            log::error!("Photo request failed: {}", e);
            PlacesError::InternalError(format!("Failed to fetch photo: {}", e))
        })
    }
}

fn legacy_status_message(status: &str, error_message: Option<&str>) -> String {
    match error_message {
        Some(msg) if !msg.is_empty() => format!("API Error: {} - {}", status, msg),
        _ => format!("API Error: {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> Config {
        Config {
            places_api_key: Some("test-key".to_string()),
            legacy_base_url: base_url.to_string(),
            v1_base_url: base_url.to_string(),
            ..Config::default()
        }
    }

    fn nearby(keyword: &str, explicit: bool) -> NearbyRequest {
        NearbyRequest {
            latitude: 40.7128,
            longitude: -74.006,
            radius: 5000,
            place_type: "restaurant".to_string(),
            keyword: keyword.to_string(),
            explicit_keyword: explicit,
            open_now: false,
            max_result_count: 20,
        }
    }

    #[test]
    fn test_missing_key_is_misconfiguration() {
        let client = GooglePlacesClient::new(&Config::default()).unwrap();
        assert!(matches!(
            client.api_key(),
            Err(PlacesError::ServerMisconfigured(_))
        ));
        assert!(client.legacy_photo_url("ref", 400).is_err());
    }

    #[test]
    fn test_photo_urls() {
        let client = GooglePlacesClient::new(&test_config("https://example.test/api/")).unwrap();

        let url = client.legacy_photo_url("AbC+1", 600).unwrap();
        assert_eq!(url.path(), "/api/photo");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("maxwidth".to_string(), "600".to_string())));
        assert!(pairs.contains(&("photo_reference".to_string(), "AbC+1".to_string())));

        let url = client.v1_media_url("places/P1/photos/F1", 400).unwrap();
        assert_eq!(url.path(), "/api/places/P1/photos/F1/media");
        assert!(url.query().unwrap().contains("maxWidthPx=400"));
    }

    #[tokio::test]
    async fn test_legacy_search_sends_expected_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/nearbysearch/json"))
            .and(query_param("location", "40.7128,-74.006"))
            .and(query_param("radius", "5000"))
            .and(query_param("type", "restaurant"))
            .and(query_param("keyword", "restaurants"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ZERO_RESULTS",
                "results": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GooglePlacesClient::new(&test_config(&server.uri())).unwrap();
        let response = client
            .legacy_nearby_search(&nearby("restaurants", false))
            .await
            .expect("zero results is success");
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_body_status_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/nearbysearch/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid.",
                "results": []
            })))
            .mount(&server)
            .await;

        let client = GooglePlacesClient::new(&test_config(&server.uri())).unwrap();
        let err = client
            .legacy_nearby_search(&nearby("restaurants", false))
            .await
            .unwrap_err();

        match err {
            PlacesError::UpstreamFailure { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("REQUEST_DENIED"));
                assert!(!message.contains("test-key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_v1_nearby_and_text_search_endpoints() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/places:searchNearby"))
            .and(header("X-Goog-Api-Key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "includedTypes": ["restaurant"],
                "maxResultCount": 20,
                "locationRestriction": { "circle": { "radius": 5000.0 } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .and(body_partial_json(serde_json::json!({
                "textQuery": "pizza",
                "includedType": "restaurant"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "places": [{ "id": "P1", "displayName": { "text": "Slice" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GooglePlacesClient::new(&test_config(&server.uri())).unwrap();

        let empty = client.v1_search(&nearby("restaurants", false)).await.unwrap();
        assert!(empty.places.is_empty());

        let found = client.v1_search(&nearby("pizza", true)).await.unwrap();
        assert_eq!(found.places.len(), 1);
        assert_eq!(found.places[0].id, "P1");
    }

    #[tokio::test]
    async fn test_v1_error_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/places:searchNearby"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {
                    "code": 403,
                    "message": "Places API (New) has not been used in project",
                    "status": "PERMISSION_DENIED"
                }
            })))
            .mount(&server)
            .await;

        let client = GooglePlacesClient::new(&test_config(&server.uri())).unwrap();
        let err = client.v1_search(&nearby("restaurants", false)).await.unwrap_err();

        match err {
            PlacesError::UpstreamFailure { status, message } => {
                assert_eq!(status, 403);
                assert!(message.starts_with("API Error: Places API (New)"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
