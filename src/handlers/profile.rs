use actix_web::{HttpResponse, Result};
use serde::Serialize;

use crate::handlers::shared::ApiResponse;
use crate::services::identity::PlatformProfile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: String,
    pub display_name: String,
    pub is_admin: bool,
    /// Client route to open after sign-in.
    pub home: &'static str,
}

pub async fn me(profile: PlatformProfile) -> Result<HttpResponse> {
    let home = profile.home_route();

    Ok(ApiResponse::success(MeResponse {
        user_id: profile.user_id,
        display_name: profile.display_name,
        is_admin: profile.is_admin,
        home,
    }))
}
