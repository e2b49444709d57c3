use crate::domain::models::{
    audit::AuditLog,
    block::AvailabilityBlock,
    booking::Booking,
    facility::{FacilityCategory, FacilityUnit},
    inventory::InventoryDay,
    rate::RateRule,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn create_category(&self, category: &FacilityCategory) -> Result<FacilityCategory, AppError>;
    async fn list_categories(&self) -> Result<Vec<FacilityCategory>, AppError>;
    async fn find_category(&self, id: &str) -> Result<Option<FacilityCategory>, AppError>;
    async fn create_unit(&self, unit: &FacilityUnit) -> Result<FacilityUnit, AppError>;
    async fn find_unit(&self, id: &str) -> Result<Option<FacilityUnit>, AppError>;
    async fn list_units(&self, active_only: bool) -> Result<Vec<FacilityUnit>, AppError>;
}

#[async_trait]
pub trait RateRuleRepository: Send + Sync {
    async fn create(&self, rule: &RateRule) -> Result<RateRule, AppError>;
    async fn list(&self) -> Result<Vec<RateRule>, AppError>;
    /// Most recent active unit-level rule whose effective window covers `on`.
    async fn find_for_unit(&self, unit_id: &str, on: NaiveDate) -> Result<Option<RateRule>, AppError>;
    /// Most recent active category-level rule (unit column NULL) covering `on`.
    async fn find_for_category(&self, category_id: &str, on: NaiveDate) -> Result<Option<RateRule>, AppError>;
}

#[async_trait]
pub trait AvailabilityBlockRepository: Send + Sync {
    async fn create(&self, block: &AvailabilityBlock) -> Result<AvailabilityBlock, AppError>;
    async fn list(&self) -> Result<Vec<AvailabilityBlock>, AppError>;
    /// Blocks for the unit whose inclusive [start_date, end_date] intersects
    /// the inclusive requested [start, end].
    async fn find_overlapping(&self, unit_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<AvailabilityBlock>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts the hold if and only if no occupying booking overlaps its
    /// range at commit time, claiming inventory for tracked days in the
    /// same transaction. Losing the race yields `AppError::Unavailable`.
    async fn create_hold(&self, booking: &Booking, now: DateTime<Utc>) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Booking>, AppError>;
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    /// Occupying bookings overlapping [start, end) for the unit, judged at `now`.
    async fn find_occupying_overlaps(&self, unit_id: &str, start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Result<Vec<Booking>, AppError>;
    /// Conditional AWAITING_PAYMENT/PAID -> CONFIRMED transition. Returns
    /// None when the booking was not in a confirmable state (the caller
    /// re-reads to distinguish an idempotent repeat from an error).
    async fn mark_confirmed(&self, id: &str, payment_ref: Option<&str>) -> Result<Option<Booking>, AppError>;
    /// Cancels and releases claimed inventory in one transaction.
    async fn cancel(&self, id: &str) -> Result<Booking, AppError>;
    async fn mark_checked_in(&self, id: &str) -> Result<Booking, AppError>;
    /// Sweeps holds whose expiry has passed to CANCELLED, releasing their
    /// inventory. Returns how many were swept.
    async fn cancel_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn upsert_day(&self, day: &InventoryDay) -> Result<InventoryDay, AppError>;
    async fn list_days(&self, unit_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<InventoryDay>, AppError>;
    /// Tracked days in [start, end) with nothing left to sell.
    async fn find_exhausted(&self, unit_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<InventoryDay>, AppError>;
}

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn record(&self, entry: &AuditLog) -> Result<(), AppError>;
    async fn list(&self, entity: Option<&str>) -> Result<Vec<AuditLog>, AppError>;
}

/// Notification seam. Delivery is an external concern; the engine only
/// hands over recipient, subject and body.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError>;
}
