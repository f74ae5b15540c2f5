// src/services/photo_proxy.rs
// DOCUMENTATION: Photo fetching through the upstream photo/media endpoints
// PURPOSE: Resolve an opaque photo identifier to image bytes without exposing the key

use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::{PhotoIdentifier, PhotoQuery};
use crate::services::google_places_client::GooglePlacesClient;
use actix_web::web::Bytes;
use reqwest::{header, Response, StatusCode};
use validator::Validate;

/// Content type used when upstream omits one
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Image bytes plus the upstream content type
#[derive(Debug)]
pub struct PhotoPayload {
    pub content_type: String,
    pub body: Bytes,
}

/// Photo proxy
/// DOCUMENTATION: At most two sequential upstream requests per call,
/// the second only to follow a single redirect
#[derive(Clone)]
pub struct PhotoProxy {
    client: GooglePlacesClient,
    default_max_width: u32,
}

impl PhotoProxy {
    pub fn new(client: GooglePlacesClient, config: &Config) -> Self {
        Self {
            client,
            default_max_width: config.default_max_width,
        }
    }

    /// Fetch the image behind an identifier
    pub async fn fetch_photo(&self, query: &PhotoQuery) -> Result<PhotoPayload, PlacesError> {
        let identifier = query.identifier(self.client.api_version())?;

        if let Err(e) = query.validate() {
            return Err(PlacesError::BadRequest(format!("Invalid parameters: {}", e)));
        }

        self.client.api_key()?;

        let max_width = query.max_width.unwrap_or(self.default_max_width);
        let url = match &identifier {
            PhotoIdentifier::Reference(reference) => {
                self.client.legacy_photo_url(reference, max_width)?
            }
            PhotoIdentifier::Resource(_) => self
                .client
                .v1_media_url(identifier.resource_name()?, max_width)?,
        };

        log::debug!(
            "Fetching photo {:?} at maxWidth={}",
            abbreviate(identifier.as_str()),
            max_width
        );

        let response = self.client.fetch(url).await?;
        let response = self.resolve_redirect(response).await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Upstream photo request returned {}", status);
            return Err(PlacesError::upstream(
                status.as_u16(),
                format!("Google API returned {}", status.as_u16()),
            ));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
            .to_string();

        let body = response.bytes().await.map_err(|e| {
            PlacesError::InternalError(format!("Failed to read photo: {}", e.without_url()))
        })?;

        log::info!("Serving photo ({} bytes, {})", body.len(), content_type);

        Ok(PhotoPayload { content_type, body })
    }

    /// Follow at most one redirect hop
    /// DOCUMENTATION: A redirect answered by another redirect is an upstream failure
    async fn resolve_redirect(&self, response: Response) -> Result<Response, PlacesError> {
        if !is_redirect(response.status()) {
            return Ok(response);
        }

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                PlacesError::upstream(502, "Upstream photo redirect without Location header")
            })?;

        let target = response.url().join(location).map_err(|e| {
            PlacesError::InternalError(format!("Invalid redirect location: {}", e))
        })?;

        log::debug!(
            "Following photo redirect ({}) to {}",
            response.status(),
            target.host_str().unwrap_or("<relative>")
        );

        let followed = self.client.fetch(target).await?;

        if is_redirect(followed.status()) {
            log::warn!("Upstream photo redirected more than once");
            return Err(PlacesError::upstream(
                502,
                "Upstream photo redirected more than once",
            ));
        }

        Ok(followed)
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Identifiers are long; logs only need a prefix
fn abbreviate(identifier: &str) -> String {
    identifier.chars().take(24).collect()
}
