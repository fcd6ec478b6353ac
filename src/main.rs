use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use dotenv::dotenv;
use env_logger::Env;
use std::env;

use shortly::logging::RemoteLogger;
use shortly::routes::init_routes;
use shortly::services::LinkService;
use shortly::state::app_state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let port_string = env::var("PORT").unwrap_or_else(|_| String::from("8080"));
    let port = port_string.parse::<u16>().expect("PORT must be a number");
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let logger = RemoteLogger::from_env();
    logger.emit(
        "backend",
        "info",
        "config",
        &format!("Server running on port {}", port),
    );

    // Create shared state
    let app_state = web::Data::new(AppState {
        service: LinkService::from_env(),
        logger,
    });

    // Start the Actix Web server
    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        // Enable CORS for all origins
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
