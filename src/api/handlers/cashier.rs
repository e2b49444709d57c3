use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::dtos::requests::CheckInRequest;
use crate::api::extractors::staff::StaffAuth;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct VerifyQuery {
    pub code: String,
}

/// Front-desk lookup by booking code. Full record, staff only.
pub async fn verify_booking(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Query(query): Query<VerifyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_code(&query.code)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn check_in(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Json(payload): Json<CheckInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.bookings.check_in(&payload.code).await?;
    Ok(Json(booking))
}
