use actix_web::{HttpResponse, Result, web};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::AppState;
use crate::database::models::SubmitPaymentInput;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::identity::PlatformProfile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

/// Save the caller's mileage, tolls and hours for one working day
pub async fn submit_payment(
    profile: PlatformProfile,
    state: web::Data<AppState>,
    input: web::Json<SubmitPaymentInput>,
) -> Result<HttpResponse> {
    let upserted = state
        .payments
        .submit(&profile, input.into_inner(), Utc::now())
        .await
        .map_err(|e| {
            let error = AppError::from(e);
            log::log!(
                error.log_level(),
                "Failed to save payment record for {}: {}",
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

/// The caller's record for a day (default: today)
pub async fn get_payment_for_day(
    profile: PlatformProfile,
    state: web::Data<AppState>,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse> {
    let date = query
        .date
        .unwrap_or_else(|| state.payments.today(Utc::now()));

    let record = state
        .payments
        .for_day(&profile.user_id, date)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound(format!("No payment record for {}", date)))?;

    Ok(ApiResponse::success(record))
}
