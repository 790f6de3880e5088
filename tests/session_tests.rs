use actix_web::{http::StatusCode, test};

mod common;
use common::{saturday_morning, weekday_morning, TestApp};

async fn screen_for(test_app: &TestApp, token: Option<&str>) -> serde_json::Value {
    let app = test::init_service(test_app.create_app()).await;

    let mut req = test::TestRequest::get().uri("/api/session");
    if let Some(token) = token {
        req = req.insert_header(TestApp::bearer(token));
    }

    let resp = test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn test_unconfigured_store_wins_over_everything() {
    let test_app = TestApp::unconfigured().await;
    let token = test_app.admin_token();

    let body = screen_for(&test_app, Some(&token)).await;
    assert_eq!(body["screen"], "misconfigured");
    assert_eq!(body["configured"], false);
}

#[actix_web::test]
async fn test_no_session_shows_login() {
    let test_app = TestApp::new().await;

    let body = screen_for(&test_app, None).await;
    assert_eq!(body["screen"], "login");
    assert!(body["username"].is_null());
}

#[actix_web::test]
async fn test_invalid_token_shows_login() {
    let test_app = TestApp::new().await;

    let body = screen_for(&test_app, Some("not-a-token")).await;
    assert_eq!(body["screen"], "login");
}

#[actix_web::test]
async fn test_admin_ignores_working_hours() {
    let test_app = TestApp::new().await;
    test_app.monitor.refresh_at(saturday_morning()).await;
    let token = test_app.admin_token();

    let body = screen_for(&test_app, Some(&token)).await;
    assert_eq!(body["screen"], "admin");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["is_working_time"], false);
}

#[actix_web::test]
async fn test_user_sees_legal_before_offline() {
    let test_app = TestApp::new().await;
    test_app.monitor.refresh_at(saturday_morning()).await;
    let token = test_app.user_token("1001", false);

    let body = screen_for(&test_app, Some(&token)).await;
    assert_eq!(body["screen"], "legal");
}

#[actix_web::test]
async fn test_user_offline_then_main() {
    let test_app = TestApp::new().await;
    let token = test_app.user_token("1001", true);

    test_app.monitor.refresh_at(saturday_morning()).await;
    let body = screen_for(&test_app, Some(&token)).await;
    assert_eq!(body["screen"], "offline");

    test_app.monitor.refresh_at(weekday_morning()).await;
    let body = screen_for(&test_app, Some(&token)).await;
    assert_eq!(body["screen"], "main");
    assert_eq!(body["username"], "1001");
}

#[actix_web::test]
async fn test_availability_reports_offline_message() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/availability").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["open"], true);
    assert!(body["message"].is_null());

    test_app.monitor.refresh_at(saturday_morning()).await;

    let req = test::TestRequest::get().uri("/api/availability").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["open"], false);
    assert!(body["message"].as_str().unwrap().contains("working hours"));
}
