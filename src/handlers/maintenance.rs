use actix_web::{HttpResponse, Result, web};
use chrono::Utc;

use crate::AppState;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::identity::AdminProfile;

/// Run the retention sweep on demand
pub async fn sweep_expired(
    AdminProfile(admin): AdminProfile,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    log::info!("Expiry sweep requested by {}", admin.user_id);

    let report = state.sweeper.sweep(Utc::now()).await.map_err(|e| {
        let error = AppError::from(e);
        log::log!(error.log_level(), "Expiry sweep failed: {}", error);
        error
    })?;

    Ok(ApiResponse::success(report))
}
