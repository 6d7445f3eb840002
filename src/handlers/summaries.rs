use actix_web::{HttpResponse, Result, web};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::AppState;
use crate::database::models::WeekQuery;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::identity::{AdminProfile, PlatformProfile};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

async fn monthly_for(
    state: &AppState,
    user_id: &str,
    query: &MonthQuery,
) -> Result<HttpResponse> {
    let today = state.summaries.today(Utc::now());
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let summary = state
        .summaries
        .monthly(user_id, year, month)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(summary))
}

async fn weekly_for(state: &AppState, user_id: &str, query: &WeekQuery) -> Result<HttpResponse> {
    let week = query
        .week
        .unwrap_or_else(|| state.summaries.default_week(Utc::now()));

    let summary = state
        .summaries
        .weekly(user_id, week)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(summary))
}

pub async fn my_monthly_summary(
    profile: PlatformProfile,
    state: web::Data<AppState>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse> {
    monthly_for(&state, &profile.user_id, &query).await
}

pub async fn my_weekly_summary(
    profile: PlatformProfile,
    state: web::Data<AppState>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse> {
    weekly_for(&state, &profile.user_id, &query).await
}

/// Everyone with at least one payment record
pub async fn list_drivers(
    _admin: AdminProfile,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let drivers = state.summaries.drivers().await.map_err(|e| {
        let error = AppError::from(e);
        log::log!(error.log_level(), "Failed to list drivers: {}", error);
        error
    })?;

    Ok(ApiResponse::success(drivers))
}

pub async fn driver_monthly_summary(
    _admin: AdminProfile,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse> {
    monthly_for(&state, &path.into_inner(), &query).await
}

pub async fn driver_weekly_summary(
    _admin: AdminProfile,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse> {
    weekly_for(&state, &path.into_inner(), &query).await
}
