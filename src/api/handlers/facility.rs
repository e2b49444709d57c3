use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::responses::{CalendarResponse, DayAvailability};
use crate::domain::models::rate::PriceType;
use crate::domain::services::pricing::compute_breakdown;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let categories = state.facility_repo.list_categories().await?;
    Ok(Json(categories))
}

pub async fn list_units(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let units = state.facility_repo.list_units(true).await?;
    Ok(Json(units))
}

pub async fn get_unit(
    State(state): State<Arc<AppState>>,
    Path(unit_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let unit = state
        .facility_repo
        .find_unit(&unit_id)
        .await?
        .ok_or(AppError::NotFound("Facility unit not found".into()))?;
    Ok(Json(unit))
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

const MAX_CALENDAR_DAYS: i64 = 92;

/// Day-by-day availability and nightly price, for the booking calendar UI.
/// Each day is checked as a one-night stay starting at midnight UTC.
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Path(unit_id): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.end < query.start {
        return Err(AppError::Validation("End date must not precede start date".into()));
    }
    if (query.end - query.start).num_days() > MAX_CALENDAR_DAYS {
        return Err(AppError::Validation("Calendar window too large (max 92 days)".into()));
    }

    let unit = state
        .facility_repo
        .find_unit(&unit_id)
        .await?
        .ok_or(AppError::NotFound("Facility unit not found".into()))?;

    info!("get_calendar: {} from {} to {}", unit.name, query.start, query.end);

    let mut days = Vec::new();
    let mut day = query.start;
    while day <= query.end {
        let start = day.and_hms_opt(0, 0, 0)
            .ok_or(AppError::Internal)?
            .and_utc();
        let end = start + Duration::days(1);

        let check = state.availability.check(&unit.id, start, end).await?;

        // Price is advisory here; a day with no rate plan simply shows none.
        let price = match state.rates.resolve(&unit, day).await {
            Ok(rule) => {
                let price_type = rule.price_type()?;
                let b = compute_breakdown(price_type, rule.base_price, &rule.currency, start, end);
                match price_type {
                    PriceType::PerNight => Some(b.total_amount),
                    PriceType::PerSlot => Some(rule.base_price),
                }
            }
            Err(AppError::Validation(_)) => None,
            Err(other) => return Err(other),
        };

        days.push(DayAvailability {
            date: day,
            available: check.available,
            reason: check.reason,
            price,
        });

        day += Duration::days(1);
    }

    Ok(Json(CalendarResponse { facility_unit_id: unit.id, days }))
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Path(unit_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    state
        .facility_repo
        .find_unit(&unit_id)
        .await?
        .ok_or(AppError::NotFound("Facility unit not found".into()))?;

    let check = state.availability.check(&unit_id, query.start_date, query.end_date).await?;
    Ok(Json(check))
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub start_date: chrono::DateTime<Utc>,
    pub end_date: chrono::DateTime<Utc>,
}
