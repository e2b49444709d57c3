use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::ports::{AvailabilityBlockRepository, BookingRepository, InventoryRepository};
use crate::error::AppError;

pub const MAX_STAY_DAYS: i64 = 365;

/// Outcome of an availability check. Business rejections are carried as a
/// value with a user-facing reason; only infrastructure failures surface
/// as errors.
#[derive(Debug, Serialize, Clone)]
pub struct Availability {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Availability {
    pub fn open() -> Self {
        Self { available: true, reason: None }
    }

    pub fn closed(reason: String) -> Self {
        Self { available: false, reason: Some(reason) }
    }
}

pub fn validate_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::Validation("Check-out must be after check-in".into()));
    }
    if (end - start).num_days() > MAX_STAY_DAYS {
        return Err(AppError::Validation("Booking period too long (max 365 days)".into()));
    }
    Ok(())
}

/// Calendar days a stay occupies: [start.date, end.date), with same-day
/// slot bookings counting their single day.
pub fn days_in_stay(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<NaiveDate> {
    let first = start.date_naive();
    let last = end.date_naive();

    if last <= first {
        return vec![first];
    }

    let mut days = Vec::new();
    let mut day = first;
    while day < last {
        days.push(day);
        day = day.succ_opt().expect("date overflow");
    }
    days
}

/// First tracked day and exclusive end day of a stay, for inventory SQL.
/// Every inventory reader and writer goes through this so the advisory
/// check and the claim inside the hold transaction agree on which days a
/// stay touches, same-day slot bookings included.
pub fn tracked_day_bounds(start: DateTime<Utc>, end: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
    let days = days_in_stay(start, end);
    let first = days[0];
    let last = days[days.len() - 1];
    (first, last + Duration::days(1))
}

pub struct AvailabilityService {
    block_repo: Arc<dyn AvailabilityBlockRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
}

impl AvailabilityService {
    pub fn new(
        block_repo: Arc<dyn AvailabilityBlockRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        inventory_repo: Arc<dyn InventoryRepository>,
    ) -> Self {
        Self { block_repo, booking_repo, inventory_repo }
    }

    /// Read-only and advisory: two concurrent requests can both pass.
    /// The authoritative re-check happens inside the hold-creation
    /// transaction. Check order is fixed so the cheapest, most actionable
    /// rejection wins.
    pub async fn check(
        &self,
        unit_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Availability, AppError> {
        validate_range(start, end)?;

        let blocks = self
            .block_repo
            .find_overlapping(unit_id, start.date_naive(), end.date_naive())
            .await?;
        if let Some(block) = blocks.first() {
            return Ok(Availability::closed(format!("Facility unavailable: {}", block.reason)));
        }

        let conflicts = self
            .booking_repo
            .find_occupying_overlaps(unit_id, start, end, Utc::now())
            .await?;
        if !conflicts.is_empty() {
            return Ok(Availability::closed(
                "Facility is already booked for the selected dates".into(),
            ));
        }

        let (first, end_excl) = tracked_day_bounds(start, end);
        let exhausted = self
            .inventory_repo
            .find_exhausted(unit_id, first, end_excl)
            .await?;
        if let Some(day) = exhausted.first() {
            return Ok(Availability::closed(format!("No inventory remaining on {}", day.day)));
        }

        Ok(Availability::open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dt(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_and_oversized_ranges() {
        assert!(validate_range(dt(2025, 6, 12), dt(2025, 6, 10)).is_err());
        assert!(validate_range(dt(2025, 6, 10), dt(2025, 6, 10)).is_err());
        assert!(validate_range(dt(2025, 1, 1), dt(2026, 6, 1)).is_err());
        assert!(validate_range(dt(2025, 6, 10), dt(2025, 6, 12)).is_ok());
    }

    #[test]
    fn stay_days_exclude_checkout_day() {
        let days = days_in_stay(dt(2025, 6, 10), dt(2025, 6, 12));
        assert_eq!(days, vec![date(2025, 6, 10), date(2025, 6, 11)]);
    }

    #[test]
    fn same_day_stay_occupies_one_day() {
        let start = Utc.with_ymd_and_hms(2025, 6, 10, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 10, 16, 0, 0).unwrap();
        assert_eq!(days_in_stay(start, end), vec![date(2025, 6, 10)]);
    }

    #[test]
    fn tracked_bounds_cover_a_same_day_stay() {
        let start = Utc.with_ymd_and_hms(2025, 6, 10, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 10, 16, 0, 0).unwrap();
        assert_eq!(
            tracked_day_bounds(start, end),
            (date(2025, 6, 10), date(2025, 6, 11)),
        );
    }

    #[test]
    fn tracked_bounds_exclude_the_checkout_day() {
        assert_eq!(
            tracked_day_bounds(dt(2025, 6, 10), dt(2025, 6, 12)),
            (date(2025, 6, 10), date(2025, 6, 12)),
        );
    }
}
