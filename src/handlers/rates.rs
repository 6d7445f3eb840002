use actix_web::{HttpResponse, Result, web};
use chrono::Utc;

use crate::AppState;
use crate::database::models::{RateUpdate, RateUpdateBody};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::identity::AdminProfile;

pub async fn list_rates(_admin: AdminProfile, state: web::Data<AppState>) -> Result<HttpResponse> {
    let entries = state.rates.list().await.map_err(AppError::from)?;

    Ok(ApiResponse::success(entries))
}

/// Save base rates and locations for several users, one write each
pub async fn save_rates(
    AdminProfile(admin): AdminProfile,
    state: web::Data<AppState>,
    input: web::Json<Vec<RateUpdate>>,
) -> Result<HttpResponse> {
    let saved = state
        .rates
        .save_many(input.into_inner(), Utc::now())
        .await
        .map_err(|e| {
            let error = AppError::from(e);
            log::log!(error.log_level(), "Rate update by {} failed: {}", admin.user_id, error);
            error
        })?;

    let message = format!("Saved {} rate entries", saved.len());
    Ok(ApiResponse::success_with_message(saved, &message))
}

pub async fn save_rate(
    AdminProfile(admin): AdminProfile,
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<RateUpdateBody>,
) -> Result<HttpResponse> {
    let update = input.into_inner().for_user(path.into_inner());

    let upserted = state.rates.save(update, Utc::now()).await.map_err(|e| {
        let error = AppError::from(e);
        log::log!(error.log_level(), "Rate update by {} failed: {}", admin.user_id, error);
        error
    })?;

    log::info!(
        "{} set the base rate of {} to {}",
        admin.user_id,
        upserted.record.record.user_id,
        upserted.record.record.base_rate
    );
    Ok(ApiResponse::success(upserted))
}
