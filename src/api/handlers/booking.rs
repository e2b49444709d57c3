use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CancelBookingRequest, CreateBookingRequest, QuoteRequest};
use crate::api::dtos::responses::{BookingCreatedResponse, BookingLookupResponse, QuoteResponse};
use crate::api::extractors::staff::{MaybeStaff, StaffAuth};
use crate::domain::models::booking::NewBookingParams;
use crate::domain::services::availability::validate_range;
use crate::domain::services::lifecycle::CancelActor;
use crate::error::AppError;
use crate::state::AppState;

/// Price preview. No hold is taken and nothing is written.
pub async fn quote(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<QuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_range(payload.start_date, payload.end_date)?;

    let breakdown = state
        .pricing
        .quote(&payload.facility_unit_id, payload.start_date, payload.end_date)
        .await?;

    Ok(Json(QuoteResponse {
        facility_unit_id: payload.facility_unit_id,
        breakdown,
    }))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::Validation("Customer name is required".into()));
    }
    if !payload.customer_email.contains('@') {
        return Err(AppError::Validation("A valid customer email is required".into()));
    }

    info!(
        "create_booking: unit {} from {} to {}",
        payload.facility_unit_id, payload.start_date, payload.end_date
    );

    let booking = state
        .bookings
        .create(NewBookingParams {
            facility_unit_id: payload.facility_unit_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            customer_phone: payload.customer_phone,
            special_requests: payload.special_requests,
        })
        .await?;

    Ok(Json(BookingCreatedResponse {
        booking_id: booking.id,
        code: booking.code,
        status: booking.status,
        total_amount: booking.total_amount,
        currency: booking.currency,
        expires_at: booking.expires_at,
    }))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_id(&booking_id)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

#[derive(Deserialize)]
pub struct LookupQuery {
    pub code: String,
}

pub async fn lookup_booking(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_repo
        .find_by_code(&query.code)
        .await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    Ok(Json(BookingLookupResponse {
        id: booking.id,
        code: booking.code,
        status: booking.status,
        start_date: booking.start_date,
        end_date: booking.end_date,
    }))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    MaybeStaff(is_staff): MaybeStaff,
    Path(booking_id): Path<String>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let actor = if is_staff {
        CancelActor::Staff
    } else {
        let email = payload
            .customer_email
            .ok_or(AppError::Validation("customer_email is required".into()))?;
        CancelActor::Customer { email }
    };

    let cancelled = state.bookings.cancel(&booking_id, actor, payload.reason).await?;
    Ok(Json(cancelled))
}
