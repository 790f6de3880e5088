use actix_web::{http::StatusCode, test};
use serde_json::json;

mod common;
use common::{customer, saturday_morning, TestApp};

#[actix_web::test]
async fn test_search_finds_customer() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.user_token("1001", true);

    let req = test::TestRequest::post()
        .uri("/api/customers/search")
        .insert_header(TestApp::bearer(&token))
        .set_json(json!({ "installation_number": "  4001234 " }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["customer"]["installationNumber"], "4001234");
    assert_eq!(
        body["map_embed_url"],
        "https://maps.google.com/maps?q=40.9923,29.0244&t=&z=17&ie=UTF8&iwloc=&output=embed"
    );
    assert_eq!(body["phone_link"], "tel:05321112233");
    assert!(body["warning"].is_null());

    let searches = test_app.wait_for_searches(1).await;
    assert_eq!(searches, vec![("1001".to_string(), "4001234".to_string())]);
}

#[actix_web::test]
async fn test_search_falls_back_to_address_map() {
    let test_app = TestApp::new().await;
    {
        let mut no_coordinates = customer("4005678");
        no_coordinates.latitude = None;
        test_app
            .repository
            .state
            .lock()
            .unwrap()
            .customers
            .push(no_coordinates);
    }
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.user_token("1001", true);

    let req = test::TestRequest::post()
        .uri("/api/customers/search")
        .insert_header(TestApp::bearer(&token))
        .set_json(json!({ "installation_number": "4005678" }))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let url = body["map_embed_url"].as_str().unwrap();
    assert!(url.contains("z=15"));
    assert!(!url.contains(' '));
}

#[actix_web::test]
async fn test_search_without_location_warns() {
    let test_app = TestApp::new().await;
    {
        let mut nowhere = customer("4009999");
        nowhere.latitude = None;
        nowhere.longitude = None;
        nowhere.address = String::new();
        test_app.repository.state.lock().unwrap().customers.push(nowhere);
    }
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.user_token("1001", true);

    let req = test::TestRequest::post()
        .uri("/api/customers/search")
        .insert_header(TestApp::bearer(&token))
        .set_json(json!({ "installation_number": "4009999" }))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["map_embed_url"].is_null());
    assert!(body["warning"].is_string());
}

#[actix_web::test]
async fn test_search_unknown_installation() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.user_token("1001", true);

    let req = test::TestRequest::post()
        .uri("/api/customers/search")
        .insert_header(TestApp::bearer(&token))
        .set_json(json!({ "installation_number": "999" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No customer found for installation '999'.");

    // Misses are still logged
    assert_eq!(test_app.wait_for_searches(1).await.len(), 1);
}

#[actix_web::test]
async fn test_search_blank_installation() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.user_token("1001", true);

    let req = test::TestRequest::post()
        .uri("/api/customers/search")
        .insert_header(TestApp::bearer(&token))
        .set_json(json!({ "installation_number": "   " }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_search_closed_outside_working_hours() {
    let test_app = TestApp::new().await;
    test_app.monitor.refresh_at(saturday_morning()).await;
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.user_token("1001", true);

    let req = test::TestRequest::post()
        .uri("/api/customers/search")
        .insert_header(TestApp::bearer(&token))
        .set_json(json!({ "installation_number": "4001234" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(test_app.repository.state.lock().unwrap().searches.is_empty());
}

#[actix_web::test]
async fn test_search_requires_accepted_statement() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.user_token("1001", false);

    let req = test::TestRequest::post()
        .uri("/api/customers/search")
        .insert_header(TestApp::bearer(&token))
        .set_json(json!({ "installation_number": "4001234" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_search_not_available_to_admin() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.admin_token();

    let req = test::TestRequest::post()
        .uri("/api/customers/search")
        .insert_header(TestApp::bearer(&token))
        .set_json(json!({ "installation_number": "4001234" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_search_requires_authentication() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/customers/search")
        .set_json(json!({ "installation_number": "4001234" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_districts() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.user_token("1001", true);

    let req = test::TestRequest::get()
        .uri("/api/districts")
        .insert_header(TestApp::bearer(&token))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["districts"], json!(["Kadıköy", "Üsküdar"]));
}
