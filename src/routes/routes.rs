use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::url_handlers::{create_short_url, get_link_stats, redirect_to_url};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/shorturls", web::post().to(create_short_url))
            // Legacy alias kept for older clients
            .route("/shorten", web::post().to(create_short_url))
            .route("/shorturls/{code}", web::get().to(get_link_stats))
            .route("/health", web::get().to(health_check)),
    );
    // Redirects live at the root so short links stay short
    cfg.route("/{code}", web::get().to(redirect_to_url));
}
