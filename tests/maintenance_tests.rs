use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use nightrun::database::{Collection, DocumentStore};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use serial_test::serial;

#[macro_use]
mod common;

use common::{TestContext, auth_header, success_data};

#[actix_web::test]
#[serial]
async fn test_sweep_removes_expired_documents() {
    let ctx = TestContext::new();
    let past = Some(Utc::now() - Duration::days(1));
    let future = Some(Utc::now() + Duration::days(30));

    ctx.store
        .insert(Collection::DriverPayments, json!({ "userId": "U1" }), past)
        .await
        .unwrap();
    ctx.store
        .insert(Collection::DriverPayments, json!({ "userId": "U2" }), future)
        .await
        .unwrap();
    ctx.store
        .insert(Collection::DesiredShift, json!({ "userId": "U1" }), past)
        .await
        .unwrap();
    ctx.store
        .insert(Collection::User, json!({ "userId": "U1" }), None)
        .await
        .unwrap();

    let app = init_app!(ctx);
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/maintenance/sweep")
        .insert_header(auth_header(&ctx.admin_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        success_data(body),
        json!({ "driverPayments": 1, "desiredShift": 1, "confirmedShift": 0 })
    );
    assert_eq!(ctx.store.len(Collection::DriverPayments).await, 1);
    assert_eq!(ctx.store.len(Collection::User).await, 1);
}

#[actix_web::test]
#[serial]
async fn test_sweep_is_admin_only() {
    let ctx = TestContext::new();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/maintenance/sweep")
        .insert_header(auth_header(&ctx.token("U1", "Taro")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
