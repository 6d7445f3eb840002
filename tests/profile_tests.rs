use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use serial_test::serial;

#[macro_use]
mod common;

use common::{CHANNEL_SECRET, TestContext, auth_header, mint_token, success_data};

#[actix_web::test]
#[serial]
async fn test_worker_lands_on_root() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);
    let name = common::fake_name();

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(auth_header(&ctx.token("U1", &name)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-correlation-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        success_data(body),
        json!({ "userId": "U1", "displayName": name, "isAdmin": false, "home": "/" })
    );
}

#[actix_web::test]
#[serial]
async fn test_admin_lands_on_shift_review() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(auth_header(&ctx.admin_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let data = success_data(body);
    assert_eq!(data["isAdmin"], json!(true));
    assert_eq!(data["home"], json!("/AdminShift"));
}

#[actix_web::test]
#[serial]
async fn test_missing_name_falls_back_to_user_id() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(auth_header(&mint_token("U4", None, CHANNEL_SECRET)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(success_data(body)["displayName"], json!("U4"));
}

#[actix_web::test]
#[serial]
async fn test_forged_token_is_rejected() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(auth_header(&mint_token("Uadmin", Some("Mallory"), "not-the-secret")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
}

#[actix_web::test]
#[serial]
async fn test_malformed_header_is_rejected() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
