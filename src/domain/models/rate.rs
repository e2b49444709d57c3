use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::error::AppError;

/// What a rate rule is attached to. Exactly one of the two, never both.
/// Persistence keeps two nullable columns underneath; this type is the
/// only way the rest of the code sees the attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateTarget {
    Unit(String),
    Category(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceType {
    PerNight,
    PerSlot,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::PerNight => "PER_NIGHT",
            PriceType::PerSlot => "PER_SLOT",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "PER_NIGHT" => Ok(PriceType::PerNight),
            "PER_SLOT" => Ok(PriceType::PerSlot),
            other => Err(AppError::Validation(format!("Unknown price type: {}", other))),
        }
    }
}

/// A price policy with an effective-date window, attached to either a
/// specific unit (override) or a whole category (default).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RateRule {
    pub id: String,
    pub facility_unit_id: Option<String>,
    pub facility_category_id: Option<String>,
    pub price_type: String,
    pub base_price: f64,
    pub currency: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewRateRule {
    pub target: RateTarget,
    pub price_type: PriceType,
    pub base_price: f64,
    pub currency: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
}

impl RateRule {
    pub fn new(params: NewRateRule) -> Self {
        let (unit_id, category_id) = match params.target {
            RateTarget::Unit(id) => (Some(id), None),
            RateTarget::Category(id) => (None, Some(id)),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            facility_unit_id: unit_id,
            facility_category_id: category_id,
            price_type: params.price_type.as_str().to_string(),
            base_price: params.base_price,
            currency: params.currency,
            effective_from: params.effective_from,
            effective_to: params.effective_to,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn price_type(&self) -> Result<PriceType, AppError> {
        PriceType::parse(&self.price_type)
    }
}
