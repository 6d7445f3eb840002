use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;
use crate::database::models::{
    ConfirmShiftBody, ConfirmShiftEntry, SaveConfirmationsInput, SubmitShiftRequestInput,
    WeekQuery,
};
use crate::domain::{WeekKey, WeekShifts};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::identity::{AdminProfile, PlatformProfile};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRequestView {
    pub week: WeekKey,
    pub days: WeekShifts,
}

fn week_or_default(state: &AppState, week: Option<WeekKey>) -> WeekKey {
    week.unwrap_or_else(|| state.shifts.default_week(Utc::now()))
}

// Shift requests
pub async fn submit_request(
    profile: PlatformProfile,
    state: web::Data<AppState>,
    input: web::Json<SubmitShiftRequestInput>,
) -> Result<HttpResponse> {
    let upserted = state
        .shifts
        .submit_request(&profile, input.into_inner(), Utc::now())
        .await
        .map_err(|e| {
            let error = AppError::from(e);
            log::log!(
                error.log_level(),
                "Failed to save shift request for {}: {}",
                profile.user_id,
                error,
            );
            error
        })?;

    if upserted.created {
        Ok(ApiResponse::created(upserted))
    } else {
        Ok(ApiResponse::success(upserted))
    }
}

pub async fn get_request(
    profile: PlatformProfile,
    state: web::Data<AppState>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse> {
    let week = week_or_default(&state, query.week);

    let days = state
        .shifts
        .request_days(&profile.user_id, week)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(ShiftRequestView { week, days }))
}

// Admin review and confirmation
pub async fn review_week(
    _admin: AdminProfile,
    state: web::Data<AppState>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse> {
    let week = week_or_default(&state, query.week);

    let review = state.shifts.review_week(week).await.map_err(|e| {
        let error = AppError::from(e);
        log::log!(error.log_level(), "Failed to load shift review for week {}: {}", week, error);
        error
    })?;

    Ok(ApiResponse::success(review))
}

pub async fn save_confirmations(
    AdminProfile(admin): AdminProfile,
    state: web::Data<AppState>,
    input: web::Json<SaveConfirmationsInput>,
) -> Result<HttpResponse> {
    let input = input.into_inner();
    let week = week_or_default(&state, input.week);

    let saved = state
        .shifts
        .save_confirmations(&admin, week, input.entries, Utc::now())
        .await
        .map_err(|e| {
            let error = AppError::from(e);
            log::log!(
                error.log_level(),
                "Failed to save confirmations for week {}: {}",
                week,
                error,
            );
            error
        })?;

    let message = format!("Confirmed {} shift(s) for week {}", saved.len(), week);
    Ok(ApiResponse::success_with_message(saved, &message))
}

pub async fn save_confirmation(
    AdminProfile(admin): AdminProfile,
    state: web::Data<AppState>,
    path: web::Path<String>,
    input: web::Json<ConfirmShiftBody>,
) -> Result<HttpResponse> {
    let body = input.into_inner();
    let week = week_or_default(&state, body.week);
    let entry = ConfirmShiftEntry {
        user_id: path.into_inner(),
        display_name: body.display_name,
        days: body.days,
    };

    let upserted = state
        .shifts
        .save_confirmation(&admin, week, entry, Utc::now())
        .await
        .map_err(AppError::from)?;

    log::info!(
        "{} confirmed week {} for {}",
        admin.user_id,
        week,
        upserted.record.record.user_id
    );
    Ok(ApiResponse::success(upserted))
}

// Published confirmations
pub async fn published_week(
    _profile: PlatformProfile,
    state: web::Data<AppState>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse> {
    let week = week_or_default(&state, query.week);

    let confirmations = state
        .shifts
        .published(week)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(confirmations))
}

pub async fn my_confirmation(
    profile: PlatformProfile,
    state: web::Data<AppState>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse> {
    let week = week_or_default(&state, query.week);

    let confirmation = state
        .shifts
        .my_confirmation(&profile.user_id, week)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("No confirmed shifts for week {}", week)))?;

    Ok(ApiResponse::success(confirmation))
}
