// src/handlers/search.rs
// DOCUMENTATION: HTTP handlers for place search
// PURPOSE: Parse requests, call the search proxy, return normalized places

use crate::errors::PlacesError;
use crate::handlers::{json_config, method_not_allowed, query_config};
use crate::models::SearchParams;
use crate::services::SearchProxy;
use actix_web::{web, HttpResponse};

/// POST /api/search
/// Canonical form: JSON body `{lat, lng, radius?, query?, openNow?}`
pub async fn search_json(
    proxy: web::Data<SearchProxy>,
    body: web::Json<SearchParams>,
) -> Result<HttpResponse, PlacesError> {
    let places = proxy.search(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// GET /api/search
/// Compatibility form: same parameters in the query string
pub async fn search_query(
    proxy: web::Data<SearchProxy>,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse, PlacesError> {
    let places = proxy.search(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(places))
}

/// Configuration for search routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/search")
            .app_data(query_config())
            .app_data(json_config())
            .route(web::post().to(search_json))
            .route(web::get().to(search_query))
            .default_service(web::to(method_not_allowed)),
    );
}
