use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{
    CreateBlockRequest, CreateCategoryRequest, CreateFacilityUnitRequest, CreateRateRuleRequest,
    UpsertInventoryRequest,
};
use crate::api::extractors::staff::StaffAuth;
use crate::domain::models::audit::AuditLog;
use crate::domain::models::block::AvailabilityBlock;
use crate::domain::models::facility::{FacilityCategory, FacilityUnit, NewFacilityUnit};
use crate::domain::models::inventory::InventoryDay;
use crate::domain::models::rate::{NewRateRule, PriceType, RateRule, RateTarget};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Category name is required".into()));
    }

    let category = FacilityCategory::new(payload.kind, payload.name, payload.description);
    let created = state.facility_repo.create_category(&category).await?;
    info!("Category created: {}", created.name);
    Ok(Json(created))
}

pub async fn create_facility_unit(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Json(payload): Json<CreateFacilityUnitRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.capacity <= 0 {
        return Err(AppError::Validation("Capacity must be positive".into()));
    }
    state
        .facility_repo
        .find_category(&payload.category_id)
        .await?
        .ok_or(AppError::NotFound("Facility category not found".into()))?;

    let unit = FacilityUnit::new(NewFacilityUnit {
        category_id: payload.category_id,
        name: payload.name,
        description: payload.description,
        capacity: payload.capacity,
    });
    let created = state.facility_repo.create_unit(&unit).await?;
    info!("Facility unit created: {}", created.name);
    Ok(Json(created))
}

pub async fn list_all_units(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
) -> Result<impl IntoResponse, AppError> {
    let units = state.facility_repo.list_units(false).await?;
    Ok(Json(units))
}

pub async fn create_rate_rule(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Json(payload): Json<CreateRateRuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let target = match (payload.facility_unit_id, payload.facility_category_id) {
        (Some(unit_id), None) => {
            state
                .facility_repo
                .find_unit(&unit_id)
                .await?
                .ok_or(AppError::NotFound("Facility unit not found".into()))?;
            RateTarget::Unit(unit_id)
        }
        (None, Some(category_id)) => {
            state
                .facility_repo
                .find_category(&category_id)
                .await?
                .ok_or(AppError::NotFound("Facility category not found".into()))?;
            RateTarget::Category(category_id)
        }
        _ => {
            return Err(AppError::Validation(
                "Rate rule must target exactly one of facility_unit_id or facility_category_id".into(),
            ));
        }
    };

    if payload.base_price <= 0.0 {
        return Err(AppError::Validation("Base price must be positive".into()));
    }
    if let Some(to) = payload.effective_to
        && to < payload.effective_from {
        return Err(AppError::Validation("effective_to must not precede effective_from".into()));
    }

    let price_type = PriceType::parse(&payload.price_type)?;

    let rule = RateRule::new(NewRateRule {
        target,
        price_type,
        base_price: payload.base_price,
        currency: payload.currency,
        effective_from: payload.effective_from,
        effective_to: payload.effective_to,
    });
    let created = state.rate_repo.create(&rule).await?;
    Ok(Json(created))
}

pub async fn list_rate_rules(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
) -> Result<impl IntoResponse, AppError> {
    let rules = state.rate_repo.list().await?;
    Ok(Json(rules))
}

pub async fn create_block(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Json(payload): Json<CreateBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.end_date < payload.start_date {
        return Err(AppError::Validation("Block end date must not precede its start date".into()));
    }
    state
        .facility_repo
        .find_unit(&payload.facility_unit_id)
        .await?
        .ok_or(AppError::NotFound("Facility unit not found".into()))?;

    let block = AvailabilityBlock::new(
        payload.facility_unit_id,
        payload.start_date,
        payload.end_date,
        payload.reason,
    );
    let created = state.block_repo.create(&block).await?;
    info!("Block created for unit {}: {}", created.facility_unit_id, created.reason);

    let entry = AuditLog::new(
        "CREATE_BLOCK",
        "AvailabilityBlock",
        &created.id,
        json!({ "facility_unit_id": created.facility_unit_id, "reason": created.reason }),
    );
    if let Err(e) = state.audit_repo.record(&entry).await {
        warn!("Failed to write audit log for CREATE_BLOCK: {:?}", e);
    }

    Ok(Json(created))
}

pub async fn list_blocks(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
) -> Result<impl IntoResponse, AppError> {
    let blocks = state.block_repo.list().await?;
    Ok(Json(blocks))
}

pub async fn delete_block(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Path(block_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.block_repo.delete(&block_id).await?;
    Ok(Json(json!({ "deleted": true })))
}

pub async fn upsert_inventory(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Json(payload): Json<UpsertInventoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.allotment <= 0 {
        return Err(AppError::Validation("Allotment must be positive".into()));
    }
    let remaining = payload.remaining.unwrap_or(payload.allotment);
    if remaining < 0 || remaining > payload.allotment {
        return Err(AppError::Validation("Remaining must be between 0 and the allotment".into()));
    }
    state
        .facility_repo
        .find_unit(&payload.facility_unit_id)
        .await?
        .ok_or(AppError::NotFound("Facility unit not found".into()))?;

    let day = InventoryDay {
        facility_unit_id: payload.facility_unit_id,
        day: payload.day,
        allotment: payload.allotment,
        remaining,
    };
    let saved = state.inventory_repo.upsert_day(&day).await?;
    Ok(Json(saved))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list().await?;
    Ok(Json(bookings))
}

#[derive(Deserialize)]
pub struct AuditQuery {
    pub entity: Option<String>,
}

pub async fn list_audit_logs(
    State(state): State<Arc<AppState>>,
    _staff: StaffAuth,
    Query(query): Query<AuditQuery>,
) -> Result<impl IntoResponse, AppError> {
    let logs = state.audit_repo.list(query.entity.as_deref()).await?;
    Ok(Json(logs))
}
