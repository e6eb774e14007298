use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{recommend_for, EngineError};
use crate::models::{
    ErrorResponse, HealthResponse, HybridRequest, HybridResponse, MatchResponse, TagsRequest,
    TripHints,
};
use crate::services::StyleEngine;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: StyleEngine,
}

/// Configure all style-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/archetypes", web::get().to(list_archetypes))
        .route("/styles/profile", web::post().to(build_profile))
        .route("/styles/match", web::post().to(match_style))
        .route("/styles/hybrid", web::post().to(hybrid_style));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn engine_error(err: EngineError) -> HttpResponse {
    let (mut builder, status_code, error) = match &err {
        EngineError::IdenticalArchetypes { .. } => {
            (HttpResponse::BadRequest(), 400, "Identical archetypes")
        }
        EngineError::UnknownArchetype { .. } => (HttpResponse::NotFound(), 404, "Unknown archetype"),
        EngineError::NoArchetypesAvailable => {
            (HttpResponse::ServiceUnavailable(), 503, "No archetypes available")
        }
    };
    builder.json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.engine.catalog();
    let status = if catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_version: catalog.version,
        archetypes: catalog.len(),
        cache: state.engine.cache_stats(),
        timestamp: chrono::Utc::now(),
    })
}

/// List the catalog archetypes in evaluation order
///
/// GET /api/v1/archetypes
async fn list_archetypes(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.engine.catalog().archetypes)
}

/// Build the trait profile for a tag set
///
/// POST /api/v1/styles/profile
///
/// Request body:
/// ```json
/// { "tags": ["hiking", "local food"] }
/// ```
async fn build_profile(
    state: web::Data<AppState>,
    req: web::Json<TagsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    HttpResponse::Ok().json(state.engine.build_profile(&req.tags))
}

/// Match a tag set to an archetype and recommend from it
///
/// POST /api/v1/styles/match
///
/// Request body:
/// ```json
/// { "tags": ["luxury", "resort"] }
/// ```
async fn match_style(
    state: web::Data<AppState>,
    req: web::Json<TagsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.engine.recommend_tags(&req.tags).await {
        Ok((result, recommendations)) => {
            tracing::info!(
                "Matched {} tags to '{}' (score {})",
                req.tags.len(),
                result.archetype.id,
                result.match_score
            );
            HttpResponse::Ok().json(MatchResponse {
                result,
                recommendations,
            })
        }
        Err(e) => {
            tracing::error!("Failed to match tags {:?}: {}", req.tags, e);
            engine_error(e)
        }
    }
}

/// Combine two catalog archetypes
///
/// POST /api/v1/styles/hybrid
///
/// Request body:
/// ```json
/// { "first": "adventure-seeker", "second": "cultural-explorer" }
/// ```
async fn hybrid_style(
    state: web::Data<AppState>,
    req: web::Json<HybridRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.engine.hybridize_ids(&req.first, &req.second) {
        Ok(hybrid) => {
            let recommendations = recommend_for(&hybrid.archetype, &TripHints::default());
            HttpResponse::Ok().json(HybridResponse {
                hybrid: hybrid.archetype,
                compatibility: hybrid.compatibility,
                recommendations,
            })
        }
        Err(e) => {
            tracing::info!("Rejected hybrid {} + {}: {}", req.first, req.second, e);
            engine_error(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;
    use crate::core::Matcher;
    use crate::services::{builtin_catalog, MatchCache};

    fn state() -> AppState {
        AppState {
            engine: StyleEngine::new(Arc::new(builtin_catalog().unwrap()), Matcher::default()),
        }
    }

    fn empty_state() -> AppState {
        let mut catalog = builtin_catalog().unwrap();
        catalog.archetypes.clear();
        AppState {
            engine: StyleEngine::new(Arc::new(catalog), Matcher::default()),
        }
    }

    #[actix_web::test]
    async fn test_match_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/styles/match")
            .set_json(serde_json::json!({ "tags": ["luxury", "resort"] }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["result"]["archetype"]["name"], "Luxury Traveler");
        assert_eq!(body["result"]["matchScore"], 75);
        assert_eq!(body["recommendations"]["destinations"][0]["name"], "Maldives");
    }

    #[actix_web::test]
    async fn test_hybrid_endpoint_rejects_identical() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/styles/hybrid")
            .set_json(serde_json::json!({ "first": "luxury-traveler", "second": "luxury-traveler" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/styles/hybrid")
            .set_json(serde_json::json!({ "first": "luxury-traveler", "second": "nomad" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_hybrid_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/styles/hybrid")
            .set_json(serde_json::json!({ "first": "adventure-seeker", "second": "cultural-explorer" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["compatibility"], 75);
        assert_eq!(body["hybrid"]["idealTrip"]["pace"], "moderate");
    }

    #[actix_web::test]
    async fn test_health_reports_catalog() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.archetypes, 3);
        assert_eq!(body.catalog_version, 1);
        assert!(body.cache.is_none());
    }

    #[actix_web::test]
    async fn test_match_without_archetypes_is_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(empty_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/styles/match")
            .set_json(serde_json::json!({ "tags": ["hiking"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.status_code, 503);
        assert_eq!(body.error, "No archetypes available");

        let req = test::TestRequest::get().uri("/health").to_request();
        let health: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health.status, "degraded");
    }

    #[actix_web::test]
    async fn test_match_rejects_too_many_tags() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let tags: Vec<String> = (0..65).map(|i| format!("tag{}", i)).collect();
        let req = test::TestRequest::post()
            .uri("/styles/match")
            .set_json(serde_json::json!({ "tags": tags }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Validation failed");
        assert_eq!(body.status_code, 400);
    }

    #[actix_web::test]
    async fn test_profile_rejects_overlong_tag() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/styles/profile")
            .set_json(serde_json::json!({ "tags": ["x".repeat(65)] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Validation failed");
        assert_eq!(body.status_code, 400);
    }

    #[actix_web::test]
    async fn test_profile_endpoint() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/styles/profile")
            .set_json(serde_json::json!({ "tags": ["Hiking", "local food", "summer"] }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["tags"], serde_json::json!(["hiking", "local food", "summer"]));
        assert_eq!(body["derivedTraits"].as_array().unwrap().len(), 3);
        assert_eq!(body["hints"]["season"], "summer");
        assert!(body["matchedTraits"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("local cuisine")));
    }

    #[actix_web::test]
    async fn test_archetypes_endpoint_lists_in_priority_order() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/archetypes").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["adventure-seeker", "luxury-traveler", "cultural-explorer"]);
    }

    #[actix_web::test]
    async fn test_health_reports_cache_stats() {
        let engine = state().engine.with_cache(Arc::new(MatchCache::new(10, 60)));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState { engine }))
                .configure(configure),
        )
        .await;

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/styles/match")
                .set_json(serde_json::json!({ "tags": ["hiking"] }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        let cache = body.cache.unwrap();
        assert_eq!(cache.hits, 1);
        assert_eq!(cache.misses, 1);
    }
}
