#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::{Duration, Utc};
use fake::{Fake, faker::name::en::Name};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;

use nightrun::config::{Config, StorageBackend};
use nightrun::database::MemoryDocumentStore;
use nightrun::services::identity::PlatformClaims;
use nightrun::AppState;

pub const CHANNEL_ID: &str = "1650000000";
pub const CHANNEL_SECRET: &str = "test-channel-secret";
pub const ISSUER: &str = "https://access.line.me";
pub const ADMIN_ID: &str = "Uadmin";

/// Builds the full app over a fresh in-memory store.
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.state.clone())
                .app_data($ctx.config_data.clone())
                .wrap(nightrun::middleware::RequestId)
                .configure(nightrun::routes::configure),
        )
        .await
    };
}

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        storage_backend: StorageBackend::Memory,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        client_base_url: "http://localhost:3000".to_string(),
        platform_channel_id: CHANNEL_ID.to_string(),
        platform_channel_secret: CHANNEL_SECRET.to_string(),
        platform_issuer: ISSUER.to_string(),
        admin_user_ids: vec![ADMIN_ID.to_string()],
        work_locations: vec!["main_office".to_string(), "warehouse".to_string()],
        utc_offset_minutes: 540,
        record_retention_months: 3,
    }
}

pub struct TestContext {
    pub config: Config,
    pub store: MemoryDocumentStore,
    pub state: web::Data<AppState>,
    pub config_data: web::Data<Config>,
}

impl TestContext {
    pub fn new() -> Self {
        let config = test_config();
        let store = MemoryDocumentStore::new();
        let state = web::Data::new(AppState::new(Arc::new(store.clone()), &config));

        TestContext {
            config_data: web::Data::new(config.clone()),
            config,
            store,
            state,
        }
    }

    pub fn token(&self, user_id: &str, display_name: &str) -> String {
        mint_token(user_id, Some(display_name), CHANNEL_SECRET)
    }

    pub fn admin_token(&self) -> String {
        mint_token(ADMIN_ID, Some("Dispatcher"), CHANNEL_SECRET)
    }
}

pub fn mint_token(user_id: &str, display_name: Option<&str>, secret: &str) -> String {
    let now = Utc::now();
    let claims = PlatformClaims {
        iss: ISSUER.to_string(),
        sub: user_id.to_string(),
        aud: CHANNEL_ID.to_string(),
        exp: (now + Duration::hours(1)).timestamp() as usize,
        iat: now.timestamp() as usize,
        name: display_name.map(str::to_string),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to mint test token")
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub fn fake_name() -> String {
    Name().fake()
}

/// Unwraps the `data` of a successful envelope.
pub fn success_data(body: Value) -> Value {
    assert_eq!(
        body["success"],
        Value::Bool(true),
        "Expected successful response but got: {}",
        body
    );
    body["data"].clone()
}
