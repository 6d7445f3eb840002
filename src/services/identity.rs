use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use anyhow::{Result, anyhow};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

use crate::config::Config;
use crate::error::AppError;

/// Claims of the ID token the messaging platform hands to the in-app browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformClaims {
    pub iss: String,
    pub sub: String, // platform user id
    pub aud: String, // channel id
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
    #[serde(default)]
    pub name: Option<String>,
}

/// Checks signature, issuer, audience and expiry of a platform ID token.
pub fn verify_id_token(token: &str, config: &Config) -> Result<PlatformClaims> {
    if config.platform_channel_secret.is_empty() || config.platform_channel_id.is_empty() {
        return Err(anyhow!("Platform identity is not configured"));
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.platform_channel_id.as_str()]);
    validation.set_issuer(&[config.platform_issuer.as_str()]);

    let token_data = decode::<PlatformClaims>(
        token,
        &DecodingKey::from_secret(config.platform_channel_secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// The caller, as resolved from the platform ID token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    pub user_id: String,
    pub display_name: String,
    pub is_admin: bool,
}

impl PlatformProfile {
    pub fn from_claims(claims: PlatformClaims, config: &Config) -> Self {
        let is_admin = config.is_admin(&claims.sub);
        let display_name = claims
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| claims.sub.clone());

        PlatformProfile {
            user_id: claims.sub,
            display_name,
            is_admin,
        }
    }

    /// Client route the user lands on: admins get the shift review screen.
    pub fn home_route(&self) -> &'static str {
        if self.is_admin { "/AdminShift" } else { "/" }
    }

    pub fn requires_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequest for PlatformProfile {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token) = bearer_token(req) else {
            return ready(Err(AppError::Unauthorized(
                "Missing or invalid authorization header".to_string(),
            )));
        };

        let Some(config) = req.app_data::<Data<Config>>() else {
            log::error!("Config missing from app data");
            return ready(Err(AppError::internal_server_error()));
        };

        match verify_id_token(token, config) {
            Ok(claims) => ready(Ok(PlatformProfile::from_claims(claims, config))),
            Err(e) => {
                log::warn!("Rejected platform ID token: {}", e);
                ready(Err(AppError::Unauthorized("Invalid token".to_string())))
            }
        }
    }
}

/// A [`PlatformProfile`] whose user id is on the admin list.
#[derive(Debug, Clone)]
pub struct AdminProfile(pub PlatformProfile);

impl FromRequest for AdminProfile {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let profile = match PlatformProfile::from_request(req, payload).into_inner() {
            Ok(profile) => profile,
            Err(e) => return ready(Err(e)),
        };

        ready(profile.requires_admin().map(|_| AdminProfile(profile)))
    }
}
