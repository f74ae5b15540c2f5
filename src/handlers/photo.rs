// src/handlers/photo.rs
// DOCUMENTATION: HTTP handler for place photos
// PURPOSE: Stream upstream image bytes back with long-lived cache headers

use crate::errors::PlacesError;
use crate::handlers::{method_not_allowed, query_config};
use crate::models::PhotoQuery;
use crate::services::PhotoProxy;
use actix_web::http::header::{self, ContentEncoding};
use actix_web::{web, HttpResponse};

/// Photo bytes never change for a given identifier
const PHOTO_CACHE_CONTROL: &str = "public, max-age=31536000";

/// GET /api/photo?reference=...|uri=...&maxWidth=...
pub async fn get_photo(
    proxy: web::Data<PhotoProxy>,
    query: web::Query<PhotoQuery>,
) -> Result<HttpResponse, PlacesError> {
    let payload = proxy.fetch_photo(&query).await?;

    Ok(HttpResponse::Ok()
        .content_type(payload.content_type)
        .insert_header((header::CACHE_CONTROL, PHOTO_CACHE_CONTROL))
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        // already-compressed image formats
        .insert_header(ContentEncoding::Identity)
        .body(payload.body))
}

/// Configuration for photo routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/photo")
            .app_data(query_config())
            .route(web::get().to(get_photo))
            .default_service(web::to(method_not_allowed)),
    );
}
