// Route exports
pub mod styles;

use actix_web::{error, web, HttpRequest, HttpResponse};
use crate::models::ErrorResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(styles::configure),
    );
}

/// JSON extractor settings: malformed bodies answer with the shared error shape
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(malformed_json)
}

fn malformed_json(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Rejected malformed JSON on {}: {}", req.path(), err);
    let body = ErrorResponse {
        error: "Invalid JSON".to_string(),
        message: err.to_string(),
        status_code: 400,
    };
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
