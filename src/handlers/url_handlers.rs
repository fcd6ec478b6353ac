use actix_web::{HttpResponse, Responder, Result, http, web};
use validator::Validate;

use crate::errors::ServiceError;
use crate::state::app_state::AppState;
use crate::structs::url_request::{ShortenRequest, ShortenResponse, StatsResponse};

/// Create a shortened URL
pub async fn create_short_url(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<ShortenRequest>,
) -> Result<impl Responder> {
    // Validate the URL before it reaches the service
    if let Err(errors) = req.validate() {
        app_state
            .logger
            .emit("backend", "warn", "handler", "rejected malformed URL");
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let created =
        app_state
            .service
            .create_short_link(&req.url, req.shortcode.as_deref(), req.validity);

    let link = match created {
        Ok(link) => link,
        Err(ServiceError::InvalidInput(msg)) => {
            app_state
                .logger
                .emit("backend", "warn", "handler", &format!("invalid input: {}", msg));
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": msg })));
        }
        Err(ServiceError::CodeConflict(code)) => {
            app_state.logger.emit(
                "backend",
                "warn",
                "service",
                &format!("shortcode '{}' already in use", code),
            );
            return Ok(HttpResponse::Conflict().json(serde_json::json!({
                "error": "Custom code already in use"
            })));
        }
        Err(ServiceError::CapacityExhausted) => {
            app_state.logger.emit(
                "backend",
                "error",
                "service",
                "short code generation exhausted its retries",
            );
            return Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "Could not allocate a unique short code, try again"
            })));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": e.to_string()
                })),
            );
        }
    };

    app_state.logger.emit(
        "backend",
        "info",
        "handler",
        &format!("created short link {}", link.code),
    );

    let response = ShortenResponse {
        short_link: app_state.service.short_url(&link.code),
        expiry: link.expiry_rfc3339(),
    };

    Ok(HttpResponse::Created().json(response))
}

/// Redirect to original URL
pub async fn redirect_to_url(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();

    match app_state.service.resolve(&code) {
        Ok(target_url) => {
            app_state.logger.emit(
                "backend",
                "info",
                "route",
                &format!("redirecting {}", code),
            );
            Ok(HttpResponse::Found()
                .append_header((http::header::LOCATION, target_url))
                .finish())
        }
        Err(ServiceError::Expired) => {
            app_state
                .logger
                .emit("backend", "warn", "route", &format!("{} has expired", code));
            Ok(HttpResponse::Gone().json(serde_json::json!({
                "error": "This URL has expired"
            })))
        }
        Err(_) => Ok(HttpResponse::NotFound().body("Short URL not found")),
    }
}

/// Stats for a single short link, including its click count
pub async fn get_link_stats(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();

    match app_state.service.stats(&code) {
        Ok(link) => {
            let expiry = link.expiry_rfc3339();
            Ok(HttpResponse::Ok().json(StatsResponse {
                shortcode: link.code,
                url: link.target_url,
                created_at: link.created_at,
                expiry,
                clicks: link.clicks,
            }))
        }
        Err(ServiceError::Expired) => Ok(HttpResponse::Gone().json(serde_json::json!({
            "error": "This URL has expired"
        }))),
        Err(_) => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Short URL not found"
        }))),
    }
}
