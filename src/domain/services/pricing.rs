use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::models::rate::PriceType;
use crate::domain::ports::FacilityRepository;
use crate::domain::services::rates::RateService;
use crate::error::AppError;

pub const TAX_RATE: f64 = 0.12;
pub const SERVICE_FEE_RATE: f64 = 0.05;
pub const SLOT_HOURS: i64 = 4;

#[derive(Debug, Serialize, Clone)]
pub struct PriceBreakdown {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub fee_amount: f64,
    pub total_amount: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nights: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<i64>,
}

/// Half-up rounding to 2 decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whole nights in the stay, never below 1: a same-day request is charged
/// as one night. Counts elapsed 24-hour periods, not calendar days crossed,
/// so a 14:00 check-in to a 10:00 check-out two days later is one night.
/// Existing records were priced this way; do not change it to a calendar
/// count.
pub fn night_count(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days().max(1)
}

/// Whole 4-hour slots covering the stay, never below 1.
pub fn slot_count(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let hours = (end - start).num_hours();
    ((hours + SLOT_HOURS - 1) / SLOT_HOURS).max(1)
}

/// Each monetary component is rounded independently, matching the pricing
/// behavior existing records were written with. The sum of the rounded
/// components can disagree with total_amount by ±0.01; total_amount is
/// authoritative.
pub fn compute_breakdown(
    price_type: PriceType,
    base_price: f64,
    currency: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> PriceBreakdown {
    let (units, nights, slots) = match price_type {
        PriceType::PerNight => {
            let n = night_count(start, end);
            (n, Some(n), None)
        }
        PriceType::PerSlot => {
            let s = slot_count(start, end);
            (s, None, Some(s))
        }
    };

    let subtotal = base_price * units as f64;
    let tax_amount = subtotal * TAX_RATE;
    let fee_amount = subtotal * SERVICE_FEE_RATE;
    let total_amount = subtotal + tax_amount + fee_amount;

    PriceBreakdown {
        subtotal: round2(subtotal),
        tax_amount: round2(tax_amount),
        fee_amount: round2(fee_amount),
        total_amount: round2(total_amount),
        currency: currency.to_string(),
        nights,
        slots,
    }
}

pub struct PricingService {
    facility_repo: Arc<dyn FacilityRepository>,
    rates: Arc<RateService>,
}

impl PricingService {
    pub fn new(facility_repo: Arc<dyn FacilityRepository>, rates: Arc<RateService>) -> Self {
        Self { facility_repo, rates }
    }

    /// Resolves the rate anchored on the check-in date and prices the whole
    /// range with it. The currency is inherited verbatim from the rule.
    pub async fn quote(
        &self,
        unit_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceBreakdown, AppError> {
        let unit = self
            .facility_repo
            .find_unit(unit_id)
            .await?
            .ok_or(AppError::NotFound("Facility unit not found".into()))?;

        let rule = self.rates.resolve(&unit, start.date_naive()).await?;
        let price_type = rule.price_type()?;

        Ok(compute_breakdown(price_type, rule.base_price, &rule.currency, start, end))
    }
}
