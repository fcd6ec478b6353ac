use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::json;

use shortly::logging::RemoteLogger;
use shortly::routes::init_routes;
use shortly::services::LinkService;
use shortly::state::app_state::AppState;

fn app_state() -> web::Data<AppState> {
    web::Data::new(AppState {
        service: LinkService::new("http://localhost:8080"),
        logger: RemoteLogger::disabled(),
    })
}

macro_rules! test_app {
    () => {
        test::init_service(App::new().app_data(app_state()).configure(init_routes)).await
    };
}

#[actix_web::test]
async fn create_returns_short_link_and_expiry() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/shorturls")
        .set_json(json!({
            "url": "https://example.com/a/b",
            "shortcode": "abc123",
            "validity": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(
        body["shortLink"]
            .as_str()
            .unwrap()
            .ends_with("/abc123")
    );
    assert!(body["expiry"].as_str().unwrap().contains('T'));
}

#[actix_web::test]
async fn create_then_redirect() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/shorturls")
        .set_json(json!({ "url": "https://example.com/target" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let short_link = body["shortLink"].as_str().unwrap();
    let code = short_link.rsplit('/').next().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/{}", code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap().to_str().unwrap(),
        "https://example.com/target"
    );
}

#[actix_web::test]
async fn legacy_shorten_route_still_creates() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({ "url": "https://example.com/legacy" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn invalid_url_is_bad_request() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/shorturls")
        .set_json(json!({ "url": "not a url" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn duplicate_shortcode_conflicts() {
    let app = test_app!();

    for (url, expected) in [
        ("https://example.com/first", StatusCode::CREATED),
        ("https://example.com/second", StatusCode::CONFLICT),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/shorturls")
            .set_json(json!({ "url": url, "shortcode": "dup" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn unknown_code_is_not_found() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/doesnotexist").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn stats_reports_clicks() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/shorturls")
        .set_json(json!({ "url": "https://example.com/stats", "shortcode": "stats1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/stats1").to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/shorturls/stats1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["shortcode"], "stats1");
    assert_eq!(body["url"], "https://example.com/stats");
    assert_eq!(body["clicks"], 1);
    assert!(body["expiry"].as_str().unwrap().contains('T'));
}

#[actix_web::test]
async fn health_reports_link_count() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["links"], 0);
}
