use std::sync::Arc;
use std::time::Duration;

use actix_web::{test, web, App};
use serde_json::Value;
use serial_test::serial;

#[actix_rt::test]
#[serial]
async fn test_health_check_reports_services() {
    // Short timeouts so the probe answers quickly even with no database up
    let mut options = mongodb::options::ClientOptions::parse("mongodb://127.0.0.1:27017")
        .await
        .unwrap();
    options.connect_timeout = Some(Duration::from_millis(200));
    options.server_selection_timeout = Some(Duration::from_millis(200));
    let client = Arc::new(mongodb::Client::with_options(options).unwrap());

    let app = test::init_service(App::new().app_data(web::Data::new(client)).route(
        "/health",
        web::get().to(tripforge_api::routes::health::health_check),
    ))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert!(body["status"].is_string());
    assert!(body["services"]["mongodb"]["status"].is_string());
    assert!(body["services"]["gemini"]["status"].is_string());
    assert!(body["services"]["unsplash"]["status"].is_string());
}
